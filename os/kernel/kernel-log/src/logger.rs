use crate::LogSink;
use alloc::boxed::Box;
use alloc::format;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

pub struct KmsgLogger {
    max_level: LevelFilter,
    sink: &'static dyn LogSink,
}

impl KmsgLogger {
    #[must_use]
    pub const fn new(max_level: LevelFilter, sink: &'static dyn LogSink) -> Self {
        Self { max_level, sink }
    }

    /// Installs this logger as the process-wide `log` backend.
    ///
    /// Call this once during host start-up.
    ///
    /// # Errors
    /// If another logger has already been installed.
    pub fn init(self) -> Result<(), SetLoggerError> {
        let max_level = self.max_level;
        log::set_logger(Box::leak(Box::new(self)))?;
        log::set_max_level(max_level);
        Ok(())
    }

    /// Renders a record the way it is stored in the sinks.
    #[must_use]
    pub fn render(record: &Record) -> alloc::string::String {
        format!(
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for KmsgLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.sink.write_line(&Self::render(record));
    }

    fn flush(&self) {
        self.sink.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RingSink;
    use log::Level;

    #[test]
    fn renders_level_target_and_message() {
        let line = KmsgLogger::render(
            &Record::builder()
                .level(Level::Warn)
                .target("sysfs_addrxlate")
                .args(format_args!("kstrtoull failed"))
                .build(),
        );
        assert_eq!(line, "[WARN] sysfs_addrxlate: kstrtoull failed");
    }

    #[test]
    fn filters_by_level() {
        let ring: &'static RingSink = Box::leak(Box::new(RingSink::new(4)));
        let logger = KmsgLogger::new(LevelFilter::Info, ring);
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("t")
                .args(format_args!("hidden"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("t")
                .args(format_args!("shown"))
                .build(),
        );
        assert_eq!(ring.snapshot(), vec!["[INFO] t: shown".to_string()]);
    }
}
