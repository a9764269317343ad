use std::env;
use std::process::ExitCode;

use log::error;

use recipe_scout::{AppConfig, SearchService};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let query = match args.get(1) {
        Some(query) => query,
        None => {
            eprintln!("usage: recipe-scout <query> [offset] [number]");
            return ExitCode::FAILURE;
        }
    };
    let offset: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(0);
    let count: u32 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(10);

    let result = async {
        let config = AppConfig::load()?;
        let service = SearchService::from_config(&config)?;
        service.search(query, offset, count).await
    }
    .await;

    match result {
        Ok(recipes) => {
            match serde_json::to_string_pretty(&recipes) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("failed to serialize results: {}", e);
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("search failed: {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
