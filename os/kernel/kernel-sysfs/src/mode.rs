use bitfield_struct::bitfield;
use core::fmt;

const READ: u8 = 0b100;
const WRITE: u8 = 0b010;
const EXEC: u8 = 0b001;

/// Permission bits of a pseudo-file, as `chmod` would show them.
///
/// Only the nine `rwx` bits for owner, group and others are modeled; the
/// remaining bits are forced to zero.
///
/// ```rust
/// # use kernel_sysfs::FileMode;
/// let m = FileMode::from_octal(0o644);
/// assert_eq!(m.owner(), 0b110);
/// assert_eq!(m.other(), 0b100);
/// assert_eq!(m.to_string(), "0644");
/// assert!(m.is_writable());
/// ```
#[bitfield(u16)]
#[derive(PartialEq, Eq)]
pub struct FileMode {
    /// Bits 0-2: permissions for others.
    #[bits(3)]
    pub other: u8,

    /// Bits 3-5: permissions for the owning group.
    #[bits(3)]
    pub group: u8,

    /// Bits 6-8: permissions for the owner.
    #[bits(3)]
    pub owner: u8,

    /// Bits 9-15: setuid/setgid/sticky and file type; never set here.
    #[bits(7)]
    __: u8,
}

impl FileMode {
    /// `rw-r--r--`
    pub const RW: Self = Self::from_octal(0o644);
    /// `r--r--r--`
    pub const RO: Self = Self::from_octal(0o444);
    /// `r--r-----`
    pub const RO_GROUP: Self = Self::from_octal(0o440);

    #[must_use]
    pub const fn from_octal(mode: u16) -> Self {
        Self::from_bits(mode & 0o777)
    }

    #[must_use]
    pub const fn as_octal(self) -> u16 {
        self.into_bits() & 0o777
    }

    /// Anyone may read.
    #[must_use]
    pub const fn is_readable(self) -> bool {
        (self.owner() | self.group() | self.other()) & READ != 0
    }

    /// Anyone may write.
    #[must_use]
    pub const fn is_writable(self) -> bool {
        (self.owner() | self.group() | self.other()) & WRITE != 0
    }

    /// Whether the mode is acceptable for an attribute file.
    ///
    /// Attribute files are never executable, never world-writable, and the
    /// owner holds at least the permissions of the group.
    #[must_use]
    pub const fn is_valid_attribute_mode(self) -> bool {
        let (owner, group, other) = (self.owner(), self.group(), self.other());
        (owner | group | other) & EXEC == 0 && other & WRITE == 0 && group & !owner == 0
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.as_octal())
    }
}
