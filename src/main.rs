//! callback-fetch entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI args
//!   3. Load config (CLI > env > file > defaults)
//!   4. Init logger once
//!   5. Build a current-thread runtime
//!   6. Schedule the fetch and wait for its single callback

use callback_fetch::{AppError, Fetcher, cli, config, logger};
use tracing::info;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let args = cli::parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("{}", cli::USAGE);
        return Ok(());
    }

    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    logger::init(effective_log_level, args.log_level.is_some())?;

    let handler = args.handler.unwrap_or(config.fetch.handler);
    let fetcher = Fetcher::from_config(&config.fetch);

    info!(
        configured_log_level = %config.log_level,
        effective_log_level = %effective_log_level,
        %handler,
        delay_ms = fetcher.delay().as_millis() as u64,
        "config loaded"
    );

    // One thread, one timer: the callback runs on the same thread that
    // scheduled it.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async move {
        let pending = fetcher.fetch(handler.into_callback());
        info!("fetch scheduled, waiting for callback");
        pending
            .await
            .map_err(|e| AppError::Runtime(format!("fetch task failed: {e}")))
    })?;

    info!("callback completed");
    Ok(())
}
