use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "nasa-cli")]
#[command(about = "Command-line client for the NASA media proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the NASA Image and Video Library
    Search { query: String },
    /// Latest EPIC snapshots
    Epic,
    /// EPIC snapshots for a date (YYYY-MM-DD)
    EpicImage { date: String },
    /// Astronomy Picture of the Day
    Apod,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match &cli.command {
        Commands::Search { query } => client
            .get(format!("{}/api/nasa-media", base))
            .query(&[("query", query)]),
        Commands::Epic => client.get(format!("{}/api/epic", base)),
        Commands::EpicImage { date } => client
            .get(format!("{}/api/epic/image", base))
            .query(&[("date", date)]),
        Commands::Apod => client.get(format!("{}/api/apod", base)),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;

    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        eprintln!("{}", serde_json::to_string_pretty(&json)?);
        std::process::exit(1);
    }

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
