use std::process::ExitCode;

use clap::Parser;
use dotenvy::dotenv;

use acai_storefront::cli::{self, Cli};
use acai_storefront::Config;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli::run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
