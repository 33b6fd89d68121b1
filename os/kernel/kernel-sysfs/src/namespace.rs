use crate::{Attribute, PseudoFs, SysfsError};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use kernel_sync::Task;
use log::{debug, warn};

/// A directory of attributes sharing one context object.
///
/// A `Namespace` value only exists while its directory is registered, and
/// every attribute it holds has its file created. Dropping it (or calling
/// [`teardown`](Self::teardown)) removes the files last-to-first and then
/// the directory. [`add_endpoint`](Self::add_endpoint) consumes the
/// namespace, so a failed step unwinds everything registered before it.
pub struct Namespace<C> {
    name: &'static str,
    fs: Arc<dyn PseudoFs>,
    ctx: C,
    attrs: Vec<Attribute<C>>,
}

impl<C> Namespace<C> {
    /// Creates the directory `name` on `fs`.
    ///
    /// # Errors
    /// Whatever `fs` reports; nothing is left behind.
    pub fn register(fs: Arc<dyn PseudoFs>, name: &'static str, ctx: C) -> Result<Self, SysfsError> {
        if let Err(e) = fs.create_dir(name) {
            warn!("{name}: error ({}) registering directory, aborting", e.errno());
            return Err(e);
        }
        debug!("{name}: directory registered");
        Ok(Self {
            name,
            fs,
            ctx,
            attrs: Vec::new(),
        })
    }

    /// Creates the file for `attr` and takes ownership of it.
    ///
    /// # Errors
    /// [`SysfsError::AlreadyExists`] for a name already in use, or whatever
    /// the filesystem reports. The namespace is torn down before the error
    /// is returned.
    pub fn add_endpoint(mut self, attr: Attribute<C>) -> Result<Self, SysfsError> {
        let step = self.attrs.len() + 1;
        let created = if self.attribute(attr.name()).is_some() {
            Err(SysfsError::AlreadyExists)
        } else {
            self.fs.create_file(self.name, attr.name(), attr.mode())
        };
        if let Err(e) = created {
            warn!(
                "{}: creating file [{step}] {} failed ({}), aborting now",
                self.name,
                attr.name(),
                e.errno()
            );
            drop(self);
            return Err(e);
        }
        debug!("{}: file [{step}] {} created", self.name, attr.name());
        self.attrs.push(attr);
        Ok(self)
    }

    /// Removes all files in reverse creation order, then the directory.
    pub fn teardown(self) {
        drop(self);
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn context(&self) -> &C {
        &self.ctx
    }

    /// Attributes in creation order.
    #[must_use]
    pub fn endpoints(&self) -> impl ExactSizeIterator<Item = &Attribute<C>> {
        self.attrs.iter()
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute<C>> {
        self.attrs.iter().find(|a| a.name() == name)
    }

    /// Reads attribute `name` on behalf of `task`.
    ///
    /// # Errors
    /// [`SysfsError::NotFound`] for an unknown name, otherwise the
    /// attribute's show error.
    pub fn show(&self, task: &Task, name: &str) -> Result<Vec<u8>, SysfsError> {
        self.attribute(name)
            .ok_or(SysfsError::NotFound)?
            .show(&self.ctx, task)
    }

    /// Writes `input` to attribute `name` on behalf of `task`.
    ///
    /// # Errors
    /// [`SysfsError::NotFound`] for an unknown name, otherwise the
    /// attribute's store error.
    pub fn store(&self, task: &Task, name: &str, input: &[u8]) -> Result<usize, SysfsError> {
        self.attribute(name)
            .ok_or(SysfsError::NotFound)?
            .store(&self.ctx, task, input)
    }
}

impl<C> Drop for Namespace<C> {
    fn drop(&mut self) {
        while let Some(attr) = self.attrs.pop() {
            self.fs.remove_file(self.name, attr.name());
        }
        self.fs.remove_dir(self.name);
        debug!("{}: directory removed", self.name);
    }
}

impl<C> fmt::Debug for Namespace<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.name)
            .field("attrs", &self.attrs)
            .finish_non_exhaustive()
    }
}
