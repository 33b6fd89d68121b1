//! Parsing and formatting of attribute values.
//!
//! Input coming from user space is untrusted text of bounded length. Numbers
//! are accepted the way kernel `kstrto*` helpers accept them:
//!
//! * one optional trailing newline (as written by `echo`);
//! * an optional `+` sign, or `-` for signed targets;
//! * radix from the prefix: `0x`/`0X` hexadecimal, a leading `0` octal,
//!   decimal otherwise;
//! * nothing else: no whitespace, no separators, no trailing garbage.
//!
//! Values that do not fit the target type are rejected like malformed text.

use crate::SysfsError;
use alloc::vec::Vec;
use core::fmt;
use log::info;

/// Integer types that attributes can hold.
pub trait KernelInt: Copy + PartialOrd + fmt::Display + TryFrom<i128> {
    const SIGNED: bool;
}

macro_rules! kernel_int {
    ($signed:expr => $($t:ty),*) => {
        $(impl KernelInt for $t {
            const SIGNED: bool = $signed;
        })*
    };
}

kernel_int!(true => i8, i16, i32, i64, isize);
kernel_int!(false => u8, u16, u32, u64, usize);

/// Rejects empty input and input longer than `max_len` bytes.
///
/// # Errors
/// [`SysfsError::InvalidArgument`] when the length is out of bounds.
pub const fn check_input_len(input: &[u8], max_len: usize) -> Result<(), SysfsError> {
    if input.is_empty() || input.len() > max_len {
        return Err(SysfsError::InvalidArgument);
    }
    Ok(())
}

/// Parses an integer with automatic radix detection.
///
/// ```rust
/// # use kernel_sysfs::parse_integer;
/// assert_eq!(parse_integer::<i32>(b"2\n"), Ok(2));
/// assert_eq!(parse_integer::<u64>(b"0x1f"), Ok(31));
/// assert_eq!(parse_integer::<u64>(b"017"), Ok(15));
/// assert_eq!(parse_integer::<i32>(b"-3"), Ok(-3));
/// assert!(parse_integer::<u32>(b"-3").is_err());
/// assert!(parse_integer::<i32>(b"1 2").is_err());
/// ```
///
/// # Errors
/// [`SysfsError::InvalidArgument`] for empty, malformed or out-of-type input.
pub fn parse_integer<T: KernelInt>(input: &[u8]) -> Result<T, SysfsError> {
    let text = input.strip_suffix(b"\n").unwrap_or(input);

    let (negative, unsigned) = match text.split_first() {
        Some((b'+', rest)) => (false, rest),
        Some((b'-', rest)) if T::SIGNED => (true, rest),
        _ => (false, text),
    };

    let (radix, digits) = split_radix(unsigned);
    if digits.is_empty() {
        return Err(SysfsError::InvalidArgument);
    }

    let mut magnitude: u64 = 0;
    for &b in digits {
        let digit = char::from(b)
            .to_digit(radix)
            .ok_or(SysfsError::InvalidArgument)?;
        magnitude = magnitude
            .checked_mul(u64::from(radix))
            .and_then(|m| m.checked_add(u64::from(digit)))
            .ok_or(SysfsError::InvalidArgument)?;
    }

    let value = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    T::try_from(value).map_err(|_| SysfsError::InvalidArgument)
}

fn split_radix(text: &[u8]) -> (u32, &[u8]) {
    match text {
        [b'0', b'x' | b'X', first, ..] if first.is_ascii_hexdigit() => (16, &text[2..]),
        [b'0', ..] => (8, text),
        _ => (10, text),
    }
}

/// Input limits and permitted range of a numeric attribute.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ValidationRule<T> {
    min: T,
    max: T,
    max_input_len: usize,
}

impl<T: KernelInt> ValidationRule<T> {
    #[must_use]
    pub const fn new(min: T, max: T, max_input_len: usize) -> Self {
        Self {
            min,
            max,
            max_input_len,
        }
    }

    #[must_use]
    pub const fn min(&self) -> T {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> T {
        self.max
    }

    #[must_use]
    pub const fn max_input_len(&self) -> usize {
        self.max_input_len
    }

    #[must_use]
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Length check followed by parsing; no range check.
    ///
    /// # Errors
    /// [`SysfsError::InvalidArgument`] for bad length or malformed text.
    pub fn decode(&self, input: &[u8]) -> Result<T, SysfsError> {
        check_input_len(input, self.max_input_len)?;
        parse_integer(input)
    }

    /// Stores `value` into `slot` if it lies within the range.
    ///
    /// A rejected value is logged together with the range and the value that
    /// stays in place; `slot` is left untouched.
    ///
    /// # Errors
    /// [`SysfsError::InvalidState`] if `value` is out of range.
    pub fn commit(&self, what: &str, slot: &mut T, value: T) -> Result<(), SysfsError> {
        if !self.contains(value) {
            info!(
                "trying to set invalid value ({value}) for {what} [allowed range: {}-{}]; resetting to previous ({})",
                self.min, self.max, *slot
            );
            return Err(SysfsError::InvalidState);
        }
        *slot = value;
        Ok(())
    }
}

/// Output buffer of a show operation.
///
/// The buffer holds at most `limit - 1` bytes; the last byte of the limit is
/// reserved for a terminator, as with `snprintf`. Text beyond that is cut off
/// and [`is_truncated`](Self::is_truncated) reports it.
#[derive(Debug, Clone)]
pub struct ShowBuffer {
    bytes: Vec<u8>,
    limit: usize,
    truncated: bool,
}

impl ShowBuffer {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(limit.saturating_sub(1)),
            limit,
            truncated: false,
        }
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    fn room(&self) -> usize {
        self.limit.saturating_sub(1).saturating_sub(self.bytes.len())
    }
}

impl fmt::Write for ShowBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let take = s.len().min(self.room());
        if take < s.len() {
            self.truncated = true;
        }
        self.bytes.extend_from_slice(&s.as_bytes()[..take]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn radix_detection() {
        assert_eq!(parse_integer::<u64>(b"10"), Ok(10));
        assert_eq!(parse_integer::<u64>(b"010"), Ok(8));
        assert_eq!(parse_integer::<u64>(b"0x10"), Ok(16));
        assert_eq!(parse_integer::<u64>(b"0X1a\n"), Ok(26));
        assert_eq!(parse_integer::<u64>(b"0"), Ok(0));
        assert_eq!(parse_integer::<u64>(b"+7"), Ok(7));
    }

    #[test]
    fn malformed_text() {
        for bad in [
            &b""[..],
            b"\n",
            b"+",
            b"-",
            b"0x",
            b"09",
            b"abc",
            b"1\n\n",
            b" 1",
            b"1 ",
            b"0xg",
            b"1_000",
        ] {
            assert_eq!(
                parse_integer::<i32>(bad),
                Err(SysfsError::InvalidArgument),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn overflow_is_rejected() {
        assert_eq!(parse_integer::<u64>(b"0xffffffffffffffff"), Ok(u64::MAX));
        assert!(parse_integer::<u64>(b"0x10000000000000000").is_err());
        assert_eq!(parse_integer::<i32>(b"-2147483648"), Ok(i32::MIN));
        assert!(parse_integer::<i32>(b"2147483648").is_err());
        assert!(parse_integer::<u8>(b"256").is_err());
    }

    #[test]
    fn decode_checks_length_first() {
        let rule = ValidationRule::new(0_i32, 2, 12);
        assert_eq!(rule.decode(b""), Err(SysfsError::InvalidArgument));
        assert_eq!(rule.decode(b"0000000000001"), Err(SysfsError::InvalidArgument));
        assert_eq!(rule.decode(b"000000000001"), Ok(1));
        // decodes fine, range is not the decoder's business
        assert_eq!(rule.decode(b"9"), Ok(9));
    }

    #[test]
    fn commit_keeps_previous_value_on_rejection() {
        let rule = ValidationRule::new(0_i32, 2, 12);
        let mut slot = 1;
        assert_eq!(rule.commit("lvl", &mut slot, 3), Err(SysfsError::InvalidState));
        assert_eq!(rule.commit("lvl", &mut slot, -1), Err(SysfsError::InvalidState));
        assert_eq!(slot, 1);
        assert_eq!(rule.commit("lvl", &mut slot, 2), Ok(()));
        assert_eq!(slot, 2);
    }

    #[test]
    fn show_buffer_truncates_like_snprintf() {
        let mut buf = ShowBuffer::new(5);
        write!(buf, "{}", 123_456).unwrap();
        assert_eq!(buf.as_bytes(), b"1234");
        assert!(buf.is_truncated());

        let mut buf = ShowBuffer::new(25);
        writeln!(buf, "{}", 2).unwrap();
        assert_eq!(buf.as_bytes(), b"2\n");
        assert!(!buf.is_truncated());
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn zero_limit_holds_nothing() {
        let mut buf = ShowBuffer::new(0);
        write!(buf, "x").unwrap();
        assert!(buf.is_empty());
        assert!(buf.is_truncated());
    }
}
