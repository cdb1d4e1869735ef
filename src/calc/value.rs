//! Conversion between raw keypad text and `(hours, minutes)` pairs.
//!
//! Parsing is deliberately lenient: anything that fails to read as a base-10
//! integer counts as zero, and minutes typed past 59 in colon form are taken
//! verbatim. The keypad feeds us nothing but digits and at most one colon, so
//! the fallbacks only fire on genuinely odd buffers.

/// Lenient integer parse; empty or unparseable text is zero.
pub fn parse_digits(s: &str) -> i32 {
    s.trim().parse().unwrap_or(0)
}

/// Reads an input buffer as `(hours, minutes)`.
///
/// Three forms are accepted:
/// - `H:MM` (or any text around a colon, each side via [`parse_digits`]),
/// - exactly four digits, split as `HHMM`,
/// - anything else without a colon, read as a raw minute count.
pub fn parse_buffer(buffer: &str) -> (i32, i32) {
    match buffer.split_once(':') {
        Some((left, right)) => (parse_digits(left), parse_digits(right)),
        None if buffer.len() == 4 => (parse_digits(&buffer[..2]), parse_digits(&buffer[2..])),
        None => {
            let total = parse_digits(buffer);
            (total / 60, total % 60)
        }
    }
}

/// Fixed-width display form: hours right-justified in three columns, a
/// literal colon, minutes zero-padded to two digits.
pub fn format_time(hours: i32, minutes: i32) -> String {
    format!("{hours:>3}:{minutes:02}")
}
