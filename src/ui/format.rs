//! Formatting of playback durations for display

/// Formats a duration in whole seconds as a zero-padded `HH:MM:SS` string.
///
/// Durations below one hour keep the hour field, e.g. `00:03:27`.
pub fn format_timestamp(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
