//! Test helpers shared across modules.

// ============================================================================
// Imports
// ============================================================================

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::Level;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

// ============================================================================
// CapturedLogs
// ============================================================================

/// In-memory sink for formatted log output.
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Routes `info`-and-above events on the current thread into a fresh
    /// buffer until the guard is dropped.
    ///
    /// Tasks on a current-thread runtime are polled on this thread too.
    pub(crate) fn install() -> (Self, DefaultGuard) {
        let logs = Self::default();

        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_target(false)
            .with_max_level(Level::INFO)
            .finish();

        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    /// Returns everything written so far.
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Returns the captured lines with the timestamp and level stripped.
    pub(crate) fn messages(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter_map(|line| line.split_once("INFO "))
            .map(|(_, message)| message.trim().to_owned())
            .collect()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
