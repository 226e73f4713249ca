//! Telemetry utilities for command timing.

use std::time::Instant;

/// Guard for timing command execution and recording metrics.
///
/// Records command latency when dropped.
pub struct CommandTimer {
    command: &'static str,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_command(self.command, duration);
    }
}

/// Standardized span constructors for channel observability.
pub mod spans {
    use channeld_proto::PlayerId;
    use tracing::{Span, info_span};

    /// Create a span for a channel actor task.
    pub fn channel(name: &str) -> Span {
        info_span!("channel", name = %name)
    }

    /// Create a span for a command execution.
    pub fn command(name: &str, actor: Option<PlayerId>, channel: &str) -> Span {
        if let Some(actor) = actor {
            info_span!("command", name = %name, actor = %actor, channel = %channel)
        } else {
            info_span!("command", name = %name, channel = %channel)
        }
    }
}
