//! Human-readable labels for report values.

/// Portuguese short weekday names, Sunday first.
pub const DAY_NAMES: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

/// Short name for a weekday index (0 = Sunday).
pub fn day_name(day_of_week: usize) -> Option<&'static str> {
    DAY_NAMES.get(day_of_week).copied()
}

/// Formats a duration in seconds with the largest fitting unit.
///
/// ```rust
/// use chatpulse::analytics::display::format_duration;
///
/// assert_eq!(format_duration(45.0), "45s");
/// assert_eq!(format_duration(720.0), "12min");
/// assert_eq!(format_duration(5400.0), "1.5h");
/// assert_eq!(format_duration(172_800.0), "2.0d");
/// ```
pub fn format_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{}s", seconds.round())
    } else if seconds < 3600.0 {
        format!("{}min", (seconds / 60.0).round())
    } else if seconds < 86_400.0 {
        format!("{:.1}h", seconds / 3600.0)
    } else {
        format!("{:.1}d", seconds / 86_400.0)
    }
}
