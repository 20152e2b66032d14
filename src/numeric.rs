//! Numeric conversion helpers used across the crate.
//!
//! Tuning durations are authored in seconds; the controller runs on whole
//! ticks. These helpers guard the conversion between the two domains with
//! debug assertions while keeping call-sites ergonomic.

/// Converts a duration in seconds into a whole tick count at `tick_rate`.
///
/// The result is rounded to the nearest tick and never drops below one, so a
/// configured interval cannot degenerate into firing every tick.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The rounded value is clamped into the u32 domain before casting."
)]
#[must_use]
pub fn ticks_from_secs(tick_rate: u32, seconds: f64) -> u32 {
    debug_assert!(
        seconds.is_finite() && seconds >= 0.0,
        "expected a finite non-negative duration, got {seconds}"
    );
    let ticks = (f64::from(tick_rate) * seconds)
        .round()
        .clamp(1.0, f64::from(u32::MAX));
    ticks as u32
}

/// Scales a tick interval by a multiplier, keeping at least one tick.
///
/// Used for the enraged shoot-interval reduction; rounding keeps the scaled
/// interval comparable against the integer phase timer.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The scaled value is clamped into the u32 domain before casting."
)]
#[must_use]
pub fn scale_ticks(ticks: u32, multiplier: f64) -> u32 {
    debug_assert!(
        multiplier.is_finite() && multiplier > 0.0,
        "expected a positive multiplier, got {multiplier}"
    );
    let scaled = (f64::from(ticks) * multiplier)
        .round()
        .clamp(1.0, f64::from(u32::MAX));
    scaled as u32
}
