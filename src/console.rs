//! Interactive console commands.
//!
//! Each line typed into the `ws-debug-client` binary maps onto one client
//! operation:
//!
//! | Line | Operation |
//! |------|-----------|
//! | `send <text>` | [`send_text`](crate::DebugSocketClient::send_text) with `<text>` verbatim |
//! | `sendJSON <json>` | [`send_json`](crate::DebugSocketClient::send_json) with `<json>` parsed |
//! | `close` | [`close`](crate::DebugSocketClient::close) |
//!
//! The command name is separated from its argument by the first whitespace
//! character (space or tab).
//!
//! # Session
//!
//! Stdin is read on a dedicated OS thread ([`spawn_stdin_reader`]) that
//! forwards lines over a channel. A read blocked on the terminal therefore
//! never holds up runtime shutdown, and [`run_session`] can return as soon
//! as the connection closes.

// ============================================================================
// Imports
// ============================================================================

use std::io::{self, BufRead};
use std::thread;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{error, warn};

use crate::client::DebugSocketClient;
use crate::error::{Error, Result};

// ============================================================================
// ConsoleCommand
// ============================================================================

/// One parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// Send the text as-is.
    Send(String),
    /// Send the value re-encoded as compact JSON.
    SendJson(Value),
    /// Close the connection.
    Close,
}

impl ConsoleCommand {
    /// Parses one console line.
    ///
    /// Returns `Ok(None)` for blank lines. For `send`, everything after the
    /// single separating whitespace character is kept byte-for-byte,
    /// including further leading or trailing whitespace.
    ///
    /// # Errors
    ///
    /// [`Error::Console`] for unknown commands or unparsable JSON.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(None);
        }

        let (name, rest) = match line.trim_start().split_once(char::is_whitespace) {
            Some((name, rest)) => (name, Some(rest)),
            None => (line.trim(), None),
        };

        match (name, rest) {
            ("send", text) => Ok(Some(Self::Send(text.unwrap_or_default().to_string()))),

            ("sendJSON", Some(json)) if !json.trim().is_empty() => {
                let value = serde_json::from_str(json)
                    .map_err(|e| Error::console(format!("invalid JSON: {e}")))?;
                Ok(Some(Self::SendJson(value)))
            }
            ("sendJSON", _) => Err(Error::console("usage: sendJSON <json>")),

            ("close", None) => Ok(Some(Self::Close)),
            ("close", Some(rest)) if rest.trim().is_empty() => Ok(Some(Self::Close)),
            ("close", Some(_)) => Err(Error::console("close takes no arguments")),

            (other, _) => Err(Error::console(format!(
                "unknown command '{other}' (expected send, sendJSON or close)"
            ))),
        }
    }

    /// Runs the command against `client`.
    ///
    /// # Errors
    ///
    /// Whatever the underlying operation returns.
    pub fn apply(&self, client: &DebugSocketClient) -> Result<()> {
        match self {
            Self::Send(text) => client.send_text(text.as_str()),
            Self::SendJson(value) => client.send_json(value),
            Self::Close => {
                client.close();
                Ok(())
            }
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Spawns a thread that forwards stdin lines until EOF or a read error.
///
/// The thread is detached; it dies with the process.
///
/// # Errors
///
/// [`Error::Io`] if the thread cannot be spawned.
pub fn spawn_stdin_reader() -> Result<mpsc::UnboundedReceiver<String>> {
    let (line_tx, line_rx) = mpsc::unbounded_channel();

    thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || forward_lines(io::stdin().lock(), &line_tx))?;

    Ok(line_rx)
}

/// Sends every line of `reader` until EOF, a read error or a dropped receiver.
fn forward_lines(reader: impl BufRead, line_tx: &mpsc::UnboundedSender<String>) {
    for line in reader.lines() {
        match line {
            Ok(line) => {
                if line_tx.send(line).is_err() {
                    return;
                }
            }
            Err(e) => {
                warn!(error = %Error::from(e), "Failed to read console input");
                return;
            }
        }
    }
}

/// Applies console lines to `client` until the connection closes.
///
/// When `lines` ends the connection is closed and awaited first.
pub async fn run_session(
    client: &DebugSocketClient,
    mut lines: mpsc::UnboundedReceiver<String>,
) {
    loop {
        tokio::select! {
            () = client.closed() => break,

            line = lines.recv() => match line {
                Some(line) => handle_line(client, &line),
                None => {
                    client.close();
                    client.closed().await;
                    break;
                }
            }
        }
    }
}

/// Runs one console line. Failures are reported and the session goes on.
pub fn handle_line(client: &DebugSocketClient, line: &str) {
    let result = ConsoleCommand::parse(line).and_then(|command| match command {
        Some(command) => command.apply(client),
        None => Ok(()),
    });

    if let Err(e) = result {
        error!("{e}");
    }
}

// ============================================================================
// Tests
// ============================================================================
