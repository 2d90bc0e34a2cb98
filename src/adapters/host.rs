use crate::domain::ports::Host;
use std::io::Write;

/// Prints host commands on stdout, one per line, for a wrapper to pick up.
#[derive(Debug, Clone, Default)]
pub struct StdoutHost;

impl Host for StdoutHost {
    fn execute(&self, command: &str) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", command) {
            tracing::error!("Failed to forward host command: {}", e);
        }
    }
}
