//! Callbacks that consume the fetched payload.
//!
//! - [`handle_data`] writes the payload to stdout.
//! - [`handle_data_with_alert`] shows it through an [`AlertHost`], blocking
//!   until the user dismisses it.
//!
//! Callbacks cannot fail from the fetcher's point of view. Write or host
//! errors are logged and dropped.

use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::AppError;
use crate::fetch::Callback;

// ── Log callback ─────────────────────────────────────────────────────────────

/// Print the payload to stdout.
pub fn handle_data(data: String) {
    let mut out = io::stdout().lock();
    if let Err(e) = write_data(&mut out, &data) {
        warn!(error = %e, "failed to write payload to stdout");
    }
}

/// Write the payload and a trailing newline to `out`.
pub fn write_data<W: Write>(out: &mut W, data: &str) -> io::Result<()> {
    writeln!(out, "{data}")?;
    out.flush()
}

// ── Alert callback ───────────────────────────────────────────────────────────

/// Host primitive for presenting text to the user as a blocking modal.
pub trait AlertHost: Send + Sync {
    /// Present `message` and return once the user has dismissed it.
    fn alert(&self, message: &str) -> Result<(), AppError>;
}

/// Show the payload through `host`.
///
/// Blocks the calling thread until the alert is dismissed. On the
/// current-thread runtime that stalls the event loop, as a modal does.
pub fn handle_data_with_alert(host: &dyn AlertHost, data: String) {
    match host.alert(&data) {
        Ok(()) => debug!("alert dismissed"),
        Err(e) => warn!(error = %e, "alert could not be shown"),
    }
}

/// [`AlertHost`] backed by the controlling terminal.
///
/// Unsupported when stdin is not a terminal: there is no one to dismiss it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalAlert;

impl AlertHost for TerminalAlert {
    fn alert(&self, message: &str) -> Result<(), AppError> {
        let stdin = io::stdin();
        let is_tty = stdin.is_terminal();
        alert_with(is_tty, &mut stdin.lock(), &mut io::stdout().lock(), message)
    }
}

/// Present `message` on `out` if `is_tty`, otherwise refuse.
fn alert_with<R: BufRead, W: Write>(
    is_tty: bool,
    input: &mut R,
    out: &mut W,
    message: &str,
) -> Result<(), AppError> {
    if !is_tty {
        return Err(AppError::Alert(
            "stdin is not a terminal; no interactive host to present the alert".into(),
        ));
    }
    present(input, out, message)
}

/// Draw the alert box on `out` and wait for one line on `input`.
fn present<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> Result<(), AppError> {
    let width = message.lines().map(|l| l.chars().count()).max().unwrap_or(0).max(24);
    let rule = "─".repeat(width + 2);

    writeln!(out, "┌{rule}┐")?;
    for line in message.lines() {
        writeln!(out, "│ {line:<width$} │")?;
    }
    writeln!(out, "└{rule}┘")?;
    write!(out, "press Enter to dismiss ")?;
    out.flush()?;

    let mut ack = String::new();
    if input.read_line(&mut ack)? == 0 {
        return Err(AppError::Alert("input closed before the alert was dismissed".into()));
    }
    writeln!(out)?;
    Ok(())
}

// ── Handler selection ────────────────────────────────────────────────────────

/// Which callback receives the payload.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    #[default]
    Log,
    Alert,
}

impl Handler {
    /// Build the callback handed to the fetcher. `Alert` uses the terminal.
    pub fn into_callback(self) -> Callback {
        self.into_callback_with(Arc::new(TerminalAlert))
    }

    /// Like [`Handler::into_callback`], with `Alert` shown through `host`.
    pub fn into_callback_with(self, host: Arc<dyn AlertHost>) -> Callback {
        match self {
            Handler::Log => Box::new(handle_data),
            Handler::Alert => Box::new(move |data| handle_data_with_alert(host.as_ref(), data)),
        }
    }
}

impl FromStr for Handler {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" => Ok(Handler::Log),
            "alert" => Ok(Handler::Alert),
            other => Err(AppError::Config(format!(
                "unknown handler '{other}' (expected 'log' or 'alert')"
            ))),
        }
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Handler::Log => "log",
            Handler::Alert => "alert",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHost {
        shown: Mutex<Vec<String>>,
    }

    impl AlertHost for RecordingHost {
        fn alert(&self, message: &str) -> Result<(), AppError> {
            self.shown.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    struct HeadlessHost;

    impl AlertHost for HeadlessHost {
        fn alert(&self, _message: &str) -> Result<(), AppError> {
            Err(AppError::Alert("headless".into()))
        }
    }

    #[test]
    fn write_data_emits_payload_line() {
        let mut buf = Vec::new();
        write_data(&mut buf, "Hello from callback").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Hello from callback\n");
    }

    #[test]
    fn alert_callback_forwards_payload() {
        let host = RecordingHost::default();
        handle_data_with_alert(&host, "Hello from callback".into());
        assert_eq!(*host.shown.lock().unwrap(), vec!["Hello from callback".to_string()]);
    }

    #[test]
    fn alert_callback_swallows_host_error() {
        handle_data_with_alert(&HeadlessHost, "ignored".into());
    }

    #[test]
    fn present_draws_box_and_waits_for_enter() {
        let mut input = Cursor::new(b"\n".to_vec());
        let mut out = Vec::new();
        present(&mut input, &mut out, "Hello from callback").unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("│ Hello from callback"));
        assert!(text.contains("press Enter to dismiss"));
        assert!(text.starts_with('┌'));
    }

    #[test]
    fn present_errors_on_closed_input() {
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();
        let err = present(&mut input, &mut out, "hi").unwrap_err();
        assert!(matches!(err, AppError::Alert(_)));
    }

    #[test]
    fn non_terminal_host_refuses_alert() {
        let mut input = Cursor::new(b"\n".to_vec());
        let mut out = Vec::new();
        let err = alert_with(false, &mut input, &mut out, "hi").unwrap_err();
        assert!(matches!(err, AppError::Alert(ref m) if m.contains("not a terminal")));
        assert!(out.is_empty());
    }

    #[test]
    fn terminal_host_presents_alert() {
        let mut input = Cursor::new(b"\n".to_vec());
        let mut out = Vec::new();
        alert_with(true, &mut input, &mut out, "hi").unwrap();
        assert!(String::from_utf8(out).unwrap().contains("│ hi"));
    }

    #[test]
    fn alert_handler_callback_reaches_host() {
        let host = Arc::new(RecordingHost::default());
        let callback = Handler::Alert.into_callback_with(host.clone());
        callback("Hello from callback".into());
        assert_eq!(*host.shown.lock().unwrap(), vec!["Hello from callback".to_string()]);
    }

    #[test]
    fn alert_handler_callback_drops_host_error() {
        let callback = Handler::Alert.into_callback_with(Arc::new(HeadlessHost));
        callback("ignored".into());
    }

    #[test]
    fn handler_parses_case_insensitively() {
        assert_eq!("log".parse::<Handler>().unwrap(), Handler::Log);
        assert_eq!(" Alert ".parse::<Handler>().unwrap(), Handler::Alert);
        assert!("popup".parse::<Handler>().is_err());
    }

    #[test]
    fn handler_display_round_trips() {
        for h in [Handler::Log, Handler::Alert] {
            assert_eq!(h.to_string().parse::<Handler>().unwrap(), h);
        }
    }

    #[test]
    fn default_handler_is_log() {
        assert_eq!(Handler::default(), Handler::Log);
    }
}
