//! A rollover-safe `strtoul`.
//!
//! Some kernels report counters that have already wrapped at 32 bits, so
//! consumers need to wrap the same way instead of rejecting or clamping
//! oversized values. This parser never fails; malformed input just yields
//! whatever digits were consumed.

/// The width counters are parsed at, the platform's C `unsigned long`.
pub type Counter = std::ffi::c_ulong;

/// Returns the value of `byte` as a digit in `base`, if it is one.
#[inline]
fn digit_value(byte: u8, base: u32) -> Option<u32> {
    char::from(byte).to_digit(36).filter(|&digit| digit < base)
}

/// Picks a base from the prefix of `input`, returning it alongside the
/// length of the prefix to skip.
///
/// `0x` (or `0X`) is hexadecimal, a leading `0` is octal, and anything else is
/// decimal. The `0x` prefix is consumed even when no hex digit follows it.
fn detect_base(input: &[u8]) -> (u32, usize) {
    match input {
        [b'0', b'x' | b'X', ..] => (16, 2),
        [b'0', ..] => (8, 0),
        _ => (10, 0),
    }
}

/// Parses an unsigned integer from the start of `input`.
///
/// A `base` of 0 autodetects the base from the prefix; anything else is used
/// as-is (2 to 36 are meaningful). Returns the parsed value and the number of
/// bytes consumed. Parsing stops at the first byte that isn't a digit in the
/// base, and arithmetic wraps at the width of [`Counter`].
///
/// ```
/// use ifstats::collection::network::parse_unsigned;
///
/// assert_eq!(parse_unsigned(b"1234 5678", 0), (1234, 4));
/// assert_eq!(parse_unsigned(b"0x1F:", 0), (31, 4));
/// assert_eq!(parse_unsigned(b"   12", 0), (0, 0));
/// ```
pub fn parse_unsigned(input: &[u8], base: u32) -> (Counter, usize) {
    let (base, mut cursor) = match base {
        0 => detect_base(input),
        base => (base, 0),
    };

    let radix = Counter::from(base);
    let mut value: Counter = 0;

    while let Some(digit) = input.get(cursor).and_then(|&byte| digit_value(byte, base)) {
        value = value.wrapping_mul(radix).wrapping_add(Counter::from(digit));
        cursor += 1;
    }

    (value, cursor)
}
