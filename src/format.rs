//! Duration formatting.

/// Format a duration in whole seconds as `HH:MM:SS`.
///
/// Components are zero-padded to two digits; hours grow past two
/// digits rather than wrapping.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
