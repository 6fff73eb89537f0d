// src/bin/extract.rs

use std::path::Path;
use std::process::ExitCode;

use quiz_bank::config::Config;
use quiz_bank::extractor;
use quiz_bank::utils::logging;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: extract <document.txt> <answers.txt> <output.json>");
        return ExitCode::FAILURE;
    }

    let (document, answers, output) = (&args[1], &args[2], &args[3]);

    if !Path::new(document).exists() {
        eprintln!("Document not found: {}", document);
        return ExitCode::FAILURE;
    }

    if !Path::new(answers).exists() {
        eprintln!("Answer key not found: {}", answers);
        return ExitCode::FAILURE;
    }

    let (config, warnings) = Config::from_env();
    let _guard = logging::init(&config.rust_log, &config.log_dir, "extract.log");
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    match extractor::run(document, answers, output) {
        Ok(report) => {
            tracing::info!("Wrote {} questions to {}", report.emitted, output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Extraction failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
