use std::collections::BTreeMap;

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "chaos-probe")]
#[command(about = "Drive a running chaos-backend and report what it does", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Call /health repeatedly and print each answer
    Health {
        #[arg(short, long, default_value_t = 10)]
        count: u32,
    },
    /// Sample /code/random and print the observed distribution
    Codes {
        #[arg(short, long, default_value_t = 1000)]
        samples: u32,
    },
    /// Show /info
    Info,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health { count } => {
            for i in 1..=count {
                let res = client.get(format!("{}/health", cli.url)).send().await?;
                let status = res.status();
                let body: Value = res.json().await?;
                println!(
                    "#{:<4} {} status={} size={}",
                    i,
                    status.as_u16(),
                    body["status"].as_str().unwrap_or("?"),
                    body["size"]
                );
            }
        }
        Commands::Codes { samples } => {
            let mut counts: BTreeMap<u16, u32> = BTreeMap::new();
            for _ in 0..samples {
                let res = client.get(format!("{}/code/random", cli.url)).send().await?;
                *counts.entry(res.status().as_u16()).or_default() += 1;
            }
            for (code, hits) in counts {
                let share = f64::from(hits) * 100.0 / f64::from(samples.max(1));
                println!("{}: {:>7} ({:.2}%)", code, hits, share);
            }
        }
        Commands::Info => {
            let res = client.get(format!("{}/info", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: chaos-backend returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
