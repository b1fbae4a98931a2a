//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign request ID)
//!     → handlers.rs (resolve threshold, classify)
//!     → response.rs (result list or structured error)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID, request_id};
pub use response::{ErrorBody, ErrorResponse};
pub use server::{AppState, HttpServer};
