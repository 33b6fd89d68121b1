use kernel_sync::Interrupted;

/// Failure of an attribute or namespace operation.
///
/// Each kind maps onto the negative errno a kernel would hand back to the
/// caller of `read(2)` / `write(2)`, see [`errno`](Self::errno).
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SysfsError {
    /// The wait for an attribute lock was interrupted; retry the operation.
    #[error("interrupted while waiting for attribute lock")]
    Interrupted,
    /// Empty or oversized input, or text that is not a number.
    #[error("invalid argument")]
    InvalidArgument,
    /// The value parsed fine but is outside what the attribute accepts.
    #[error("value outside the permitted range")]
    InvalidState,
    /// Registration or allocation could not be completed.
    #[error("resource unavailable")]
    ResourceUnavailable,
    /// A subsystem required at activation is not present.
    #[error("operation not supported")]
    Unsupported,
    #[error("entry already exists")]
    AlreadyExists,
    #[error("no such entry")]
    NotFound,
    /// Write to an attribute that has no store operation.
    #[error("permission denied")]
    PermissionDenied,
}

impl SysfsError {
    /// The (negative) errno value for this error.
    #[must_use]
    pub const fn errno(self) -> i32 {
        match self {
            Self::Interrupted => -512, // ERESTARTSYS
            Self::InvalidArgument => -22,
            Self::InvalidState => -14,
            Self::ResourceUnavailable => -12,
            Self::Unsupported => -95,
            Self::AlreadyExists => -17,
            Self::NotFound => -2,
            Self::PermissionDenied => -13,
        }
    }
}

impl From<Interrupted> for SysfsError {
    fn from(_: Interrupted) -> Self {
        Self::Interrupted
    }
}

/// Formatting into a [`ShowBuffer`](crate::ShowBuffer) does not fail; any
/// other formatter error means the output could not be produced.
impl From<core::fmt::Error> for SysfsError {
    fn from(_: core::fmt::Error) -> Self {
        Self::ResourceUnavailable
    }
}
