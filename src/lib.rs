// Library root. Exposes the fetcher and its callbacks to the binary and to
// integration tests. The binary entry point is src/main.rs.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod logger;

pub use error::AppError;
pub use fetch::{DEFAULT_DELAY, DEFAULT_PAYLOAD, Fetcher, fetch_data};
pub use handlers::{AlertHost, Handler, TerminalAlert, handle_data, handle_data_with_alert};
