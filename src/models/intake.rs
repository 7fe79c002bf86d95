//! Intake helpers: duration coercion and id generation.
//!
//! Intake is deliberately forgiving — there is no error taxonomy. A
//! malformed duration falls back to the default rather than being
//! rejected, and ids are short random base-36 strings with no registry.

use rand::Rng;

/// Default treatment estimate when the intake form gives none, in minutes.
pub const DEFAULT_ESTIMATED_MINUTES: u32 = 15;

/// Length of generated patient ids.
const ID_LEN: usize = 9;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Coerces a raw duration field to minutes.
///
/// Non-numeric input, zero, and negative values all fall back to
/// [`DEFAULT_ESTIMATED_MINUTES`]. Leading/trailing whitespace is ignored.
pub fn parse_duration_minutes(raw: &str) -> u32 {
    parse_duration_minutes_or(raw, DEFAULT_ESTIMATED_MINUTES)
}

/// Like [`parse_duration_minutes`] with a caller-supplied fallback.
pub fn parse_duration_minutes_or(raw: &str, default: u32) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => n.min(u32::MAX as i64) as u32,
        _ => default,
    }
}

/// Generates a fresh patient id: nine random lowercase base-36 characters.
///
/// Collisions are possible in principle but ignored, as with any short
/// random token; the scheduler never indexes by id alone in a way that
/// would corrupt state on a duplicate.
pub fn fresh_patient_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
