use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use mta_hosting_optimizer::classifier::Classification;
use mta_hosting_optimizer::config::load_or_default;
use mta_hosting_optimizer::inventory::{DatasetLoader, loader_for};

#[derive(Parser)]
#[command(name = "optimizer-cli")]
#[command(about = "Management CLI for the MTA Hosting Optimizer", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the running service for inefficient host groups
    Query {
        #[arg(long, default_value = "/mta-hosting-optimizer")]
        path: String,
    },
    /// Check service liveness
    Health,
    /// Classify the configured inventory locally, without a server
    Classify {
        #[arg(short, long, allow_negative_numbers = true)]
        threshold: i64,

        #[arg(short, long, env = "OPTIMIZER_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { path } => {
            let client = reqwest::Client::new();
            let res = client.get(format!("{}{}", cli.url, path)).send().await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let client = reqwest::Client::new();
            let res = client.get(format!("{}/healthz", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Classify { threshold, config } => {
            let config = load_or_default(config.as_deref())?;
            let dataset = loader_for(&config.inventory).load()?;
            print_classification(&Classification::evaluate(&dataset, threshold));
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    if json.get("status").and_then(Value::as_str) == Some("Error") {
        eprintln!("Error: query failed");
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn print_classification(classification: &Classification) {
    println!("threshold: {}", classification.threshold);
    println!("{:<24} {:>9} {:>5}  {}", "GROUP", "ENDPOINTS", "LIVE", "INEFFICIENT");
    for group in &classification.groups {
        println!(
            "{:<24} {:>9} {:>5}  {}",
            group.name,
            group.endpoints,
            group.live,
            if group.inefficient { "yes" } else { "no" }
        );
    }
}
