use crate::{FileMode, ShowBuffer, SysfsError};
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use kernel_sync::Task;

/// Read side of an attribute.
///
/// `ctx` is the state object owned by the attribute's [`Namespace`](crate::Namespace);
/// `task` is the reader, whose pending signals may interrupt lock waits.
pub trait Show<C>: Send + Sync {
    /// Formats the current value into `buf`.
    ///
    /// # Errors
    /// [`SysfsError::Interrupted`] if the guard could not be taken; any other
    /// kind the handler chooses to report.
    fn show(&self, ctx: &C, task: &Task, buf: &mut ShowBuffer) -> Result<(), SysfsError>;
}

/// Write side of an attribute. Every writable attribute is also readable.
pub trait Store<C>: Show<C> {
    /// Parses, validates and commits `input`; returns the number of bytes
    /// consumed.
    ///
    /// A failing store must leave the guarded value as it was.
    ///
    /// # Errors
    /// The reason the input was not applied.
    fn store(&self, ctx: &C, task: &Task, input: &[u8]) -> Result<usize, SysfsError>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

enum Handler<C> {
    ReadOnly(Box<dyn Show<C>>),
    ReadWrite(Box<dyn Store<C>>),
}

/// One named endpoint of a namespace.
pub struct Attribute<C> {
    name: &'static str,
    mode: FileMode,
    show_limit: usize,
    handler: Handler<C>,
}

impl<C> Attribute<C> {
    /// A read-only attribute; `mode` must not grant write access.
    ///
    /// `show_limit` is the size of the output buffer including its
    /// terminator byte.
    ///
    /// # Errors
    /// [`SysfsError::InvalidArgument`] for a bad name or mode.
    pub fn read_only<H>(
        name: &'static str,
        mode: FileMode,
        show_limit: usize,
        handler: H,
    ) -> Result<Self, SysfsError>
    where
        H: Show<C> + 'static,
    {
        Self::validate(name, mode, Access::ReadOnly)?;
        Ok(Self {
            name,
            mode,
            show_limit,
            handler: Handler::ReadOnly(Box::new(handler)),
        })
    }

    /// A readable and writable attribute; `mode` must grant write access.
    ///
    /// # Errors
    /// [`SysfsError::InvalidArgument`] for a bad name or mode.
    pub fn read_write<H>(
        name: &'static str,
        mode: FileMode,
        show_limit: usize,
        handler: H,
    ) -> Result<Self, SysfsError>
    where
        H: Store<C> + 'static,
    {
        Self::validate(name, mode, Access::ReadWrite)?;
        Ok(Self {
            name,
            mode,
            show_limit,
            handler: Handler::ReadWrite(Box::new(handler)),
        })
    }

    fn validate(name: &str, mode: FileMode, access: Access) -> Result<(), SysfsError> {
        let name_ok = !name.is_empty() && !name.contains('/') && name != "." && name != "..";
        let access_ok = match access {
            Access::ReadOnly => mode.is_readable() && !mode.is_writable(),
            Access::ReadWrite => mode.is_writable(),
        };
        if name_ok && access_ok && mode.is_valid_attribute_mode() {
            Ok(())
        } else {
            Err(SysfsError::InvalidArgument)
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn mode(&self) -> FileMode {
        self.mode
    }

    #[must_use]
    pub const fn show_limit(&self) -> usize {
        self.show_limit
    }

    #[must_use]
    pub const fn access(&self) -> Access {
        match self.handler {
            Handler::ReadOnly(_) => Access::ReadOnly,
            Handler::ReadWrite(_) => Access::ReadWrite,
        }
    }

    /// Runs the show handler and returns what it wrote.
    ///
    /// # Errors
    /// Whatever the handler reports.
    pub fn show(&self, ctx: &C, task: &Task) -> Result<Vec<u8>, SysfsError> {
        let mut buf = ShowBuffer::new(self.show_limit);
        match &self.handler {
            Handler::ReadOnly(h) => h.show(ctx, task, &mut buf)?,
            Handler::ReadWrite(h) => h.show(ctx, task, &mut buf)?,
        }
        Ok(buf.into_bytes())
    }

    /// Runs the store handler.
    ///
    /// # Errors
    /// [`SysfsError::PermissionDenied`] for read-only attributes, otherwise
    /// whatever the handler reports.
    pub fn store(&self, ctx: &C, task: &Task, input: &[u8]) -> Result<usize, SysfsError> {
        match &self.handler {
            Handler::ReadOnly(_) => Err(SysfsError::PermissionDenied),
            Handler::ReadWrite(h) => h.store(ctx, task, input),
        }
    }
}

impl<C> fmt::Debug for Attribute<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("mode", &format_args!("{}", self.mode))
            .field("access", &self.access())
            .field("show_limit", &self.show_limit)
            .finish_non_exhaustive()
    }
}
