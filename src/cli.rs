//! Command-line argument parsing.

use crate::error::AppError;
use crate::handlers::Handler;
use crate::logger;

pub const USAGE: &str = "\
Usage: callback-fetch [OPTIONS]

Options:
  -h, --help                 Print help
  -f, --config <PATH>        Path to configuration file (default: config/default.toml)
      --handler <log|alert>  Callback that receives the payload
  -v, -vv, -vvv, -vvvv       Increase logging verbosity";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub help: bool,
    pub config_path: Option<String>,
    pub handler: Option<Handler>,
    /// Level implied by `-v` flags; `None` defers to config.
    pub log_level: Option<&'static str>,
}

/// Parse arguments (without the program name). Unknown arguments are ignored.
pub fn parse_args<I>(args: I) -> Result<CliArgs, AppError>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut verbosity = 0u8;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "-f" | "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| AppError::Cli("-f/--config requires a path argument".into()))?;
                parsed.config_path = Some(path);
            }
            "--handler" => {
                let name = iter
                    .next()
                    .ok_or_else(|| AppError::Cli("--handler requires a value".into()))?;
                parsed.handler = Some(
                    name.parse::<Handler>()
                        .map_err(|e| AppError::Cli(e.to_string()))?,
                );
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                let count = u8::try_from(a.len() - 1).unwrap_or(u8::MAX);
                verbosity = verbosity.saturating_add(count);
            }
            _ => {}
        }
    }

    parsed.log_level = logger::level_for_verbosity(verbosity);
    Ok(parsed)
}
