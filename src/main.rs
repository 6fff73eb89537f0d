// src/main.rs

use quiz_bank::bank::QuestionBank;
use quiz_bank::config::Config;
use quiz_bank::routes;
use quiz_bank::state::AppState;
use quiz_bank::utils::logging;
use std::net::SocketAddr;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration from environment (and .env, if present)
    let (config, warnings) = Config::from_env();

    let _guard = logging::init(&config.rust_log, &config.log_dir, "app.log");
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    // The bank is loaded once and never changes while serving.
    let bank = match QuestionBank::load(&config.bank_path) {
        Ok(bank) => bank,
        Err(e) => {
            tracing::error!("Failed to load question bank: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if bank.is_empty() {
        tracing::warn!("Question bank {} is empty", config.bank_path);
    }

    let addr: SocketAddr = match config.bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid BIND_ADDR {:?}: {}", config.bind_addr, e);
            return ExitCode::FAILURE;
        }
    };

    // Create the Axum application router
    let app = routes::create_router(AppState::new(bank, config));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Listening on {}", addr);

    // Start the server
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
