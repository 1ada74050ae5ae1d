use std::process::ExitCode;

use clap::{Parser, Subcommand};
use reqwest::{Client, Method, RequestBuilder};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "match-cli")]
#[command(about = "Command-line client for the match tracker API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080", env = "MATCH_TRACKER_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all matches
    List,
    /// Show one match
    Get { id: i32 },
    /// Create a match (date as YYYY-MM-DD)
    Create {
        home_team: String,
        away_team: String,
        match_date: String,
    },
    /// Replace the teams and date of a match
    Update {
        id: i32,
        home_team: String,
        away_team: String,
        match_date: String,
    },
    /// Delete a match
    Delete { id: i32 },
    /// Register a goal
    Goal { id: i32 },
    /// Register a yellow card
    YellowCard { id: i32 },
    /// Register a red card
    RedCard { id: i32 },
    /// Add one minute of extra time
    ExtraTime { id: i32 },
    /// Check service and store health
    Health,
}

fn match_body(home_team: String, away_team: String, match_date: String) -> Value {
    json!({
        "homeTeam": home_team,
        "awayTeam": away_team,
        "matchDate": match_date,
    })
}

impl Commands {
    fn request(self, client: &Client, base: &str) -> RequestBuilder {
        let api = format!("{}/api/matches", base.trim_end_matches('/'));
        match self {
            Commands::List => client.get(api),
            Commands::Get { id } => client.get(format!("{api}/{id}")),
            Commands::Create {
                home_team,
                away_team,
                match_date,
            } => client
                .post(api)
                .json(&match_body(home_team, away_team, match_date)),
            Commands::Update {
                id,
                home_team,
                away_team,
                match_date,
            } => client
                .put(format!("{api}/{id}"))
                .json(&match_body(home_team, away_team, match_date)),
            Commands::Delete { id } => client.delete(format!("{api}/{id}")),
            Commands::Goal { id } => client.request(Method::PATCH, format!("{api}/{id}/goals")),
            Commands::YellowCard { id } => {
                client.request(Method::PATCH, format!("{api}/{id}/yellowcards"))
            }
            Commands::RedCard { id } => {
                client.request(Method::PATCH, format!("{api}/{id}/redcards"))
            }
            Commands::ExtraTime { id } => {
                client.request(Method::PATCH, format!("{api}/{id}/extratime"))
            }
            Commands::Health => client.get(format!("{}/health", base.trim_end_matches('/'))),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = Client::new();

    let res = cli.command.request(&client, &cli.url).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(ExitCode::FAILURE);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(ExitCode::SUCCESS)
}
