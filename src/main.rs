mod config;
mod console;
mod display;
mod error;
mod game;
mod parser;
mod roster;
mod web;

use config::{Config, Mode};
use env_logger::Env;
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;

    match config.mode {
        Mode::Web { bind, port } => {
            println!("Starting BOOM-PAM on {}:{}...", bind, port);
            println!("Access the game at http://localhost:{}", port);
            info!("listening on {}:{}, keeping up to {} games", bind, port, web::MAX_GAMES);
            web::start_server(&bind, port, config.seed).await?;
        }
        Mode::Play { csv_path } => {
            info!("console game from {}", csv_path.display());
            console::play(&csv_path, config.seed)?;
        }
    }

    Ok(())
}
