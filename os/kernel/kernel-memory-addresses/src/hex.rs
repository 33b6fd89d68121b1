use core::fmt;

/// Number of hex digits of a native machine word on the build target.
#[cfg(target_pointer_width = "64")]
pub const ADDR_HEX_DIGITS: usize = 16;

/// Number of hex digits of a native machine word on the build target.
#[cfg(target_pointer_width = "32")]
pub const ADDR_HEX_DIGITS: usize = 8;

/// Renders an address as `0x` plus [`ADDR_HEX_DIGITS`] lower-case,
/// zero-padded hex digits.
///
/// On 32-bit targets only the low 32 bits are shown, matching a native
/// `unsigned long`.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct HexAddress(u64);

impl HexAddress {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Length of the rendered text, including the `0x` prefix.
    #[must_use]
    pub const fn rendered_len() -> usize {
        2 + ADDR_HEX_DIGITS
    }
}

impl fmt::Display for HexAddress {
    #[allow(clippy::cast_possible_truncation)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[cfg(target_pointer_width = "32")]
        let value = u64::from(self.0 as u32);
        #[cfg(target_pointer_width = "64")]
        let value = self.0;
        write!(f, "0x{value:0width$x}", width = ADDR_HEX_DIGITS)
    }
}

impl fmt::Debug for HexAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_follows_word_size() {
        let s = HexAddress::new(0xdead).to_string();
        assert_eq!(s.len(), HexAddress::rendered_len());
        assert!(s.starts_with("0x"));
        assert!(s.ends_with("dead"));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn full_width_on_64_bit() {
        assert_eq!(
            HexAddress::new(0xffff_8880_0000_0000).to_string(),
            "0xffff888000000000"
        );
    }
}
