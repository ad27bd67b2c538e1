//! Deterministic display names for anonymous users
//!
//! The name is a pure function of the user id, so the same id always shows
//! up under the same name no matter which process derived it.

/// Upper bound of the numeric suffix (inclusive)
pub const DISPLAY_NUMBER_MAX: u32 = 9999;

/// 32-bit rolling hash over the UTF-16 code units of `s`.
///
/// `h = h * 31 + unit`, wrapping on overflow.
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
    })
}

/// Maps a user id into `1..=DISPLAY_NUMBER_MAX`.
pub fn display_number(user_id: &str) -> u32 {
    let magnitude = i64::from(string_hash(user_id)).unsigned_abs();
    (magnitude % u64::from(DISPLAY_NUMBER_MAX)) as u32 + 1
}

/// Formats the display name for `user_id`, e.g. `Anonymous User #0400`.
pub fn display_name(user_id: &str) -> String {
    format!("Anonymous User #{:04}", display_number(user_id))
}
