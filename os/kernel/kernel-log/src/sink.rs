use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use kernel_sync::SpinMutex;

/// Destination for rendered log lines.
pub trait LogSink: Send + Sync {
    fn write_line(&self, line: &str);

    fn flush(&self) {}
}

/// Bounded buffer of the most recent log lines.
///
/// Once `capacity` lines are stored, each new line evicts the oldest one.
pub struct RingSink {
    capacity: usize,
    lines: SpinMutex<VecDeque<String>>,
}

impl RingSink {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            lines: SpinMutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    /// Copy of the buffered lines, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.with_lock(|l| l.iter().cloned().collect())
    }

    /// Removes and returns the buffered lines, oldest first.
    pub fn drain(&self) -> Vec<String> {
        self.lines.with_lock(|l| l.drain(..).collect())
    }

    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.with_lock(|l| l.iter().any(|line| line.contains(needle)))
    }
}

impl LogSink for RingSink {
    fn write_line(&self, line: &str) {
        self.lines.with_lock(|l| {
            if l.len() == self.capacity {
                l.pop_front();
            }
            l.push_back(line.to_string());
        });
    }
}

/// Writes every line to standard error.
#[cfg(feature = "std")]
#[derive(Debug, Default)]
pub struct StderrSink;

#[cfg(feature = "std")]
impl LogSink for StderrSink {
    fn write_line(&self, line: &str) {
        use std::io::Write;
        // Best effort; a closed stderr must not take the host down.
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        use std::io::Write;
        let _ = std::io::stderr().flush();
    }
}
