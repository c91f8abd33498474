//! src/format.rs
//!
//! Human-readable rates, byte counts and durations (1024-based units).

use std::time::Duration;

const UNIT: u64 = 1024;
const RATE_UNITS: [&str; 6] = ["KB/s", "MB/s", "GB/s", "TB/s", "PB/s", "EB/s"];
const BYTE_UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Scale `value` into the largest unit from `units` that keeps it >= 1.
fn scaled(value: u64, units: &[&'static str]) -> (f64, &'static str) {
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = value / UNIT;
    while n >= UNIT && exp + 1 < units.len() {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    (value as f64 / div as f64, units[exp])
}

/// `"512 B/s"`, `"1.50 KB/s"`, ... up to `EB/s`.
pub fn format_bandwidth(bytes_per_sec: u64) -> String {
    if bytes_per_sec < UNIT {
        return format!("{bytes_per_sec} B/s");
    }
    let (value, unit) = scaled(bytes_per_sec, &RATE_UNITS);
    format!("{value:.2} {unit}")
}

/// `"512 B"`, `"1.50 KB"`, ... up to `TB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < UNIT {
        return format!("{bytes} B");
    }
    let (value, unit) = scaled(bytes, &BYTE_UNITS);
    format!("{value:.2} {unit}")
}

/// `"42s"`, `"3m7s"`, `"2h15m"`.
pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.as_secs();
    match seconds {
        0..60 => format!("{seconds}s"),
        60..3600 => format!("{}m{}s", seconds / 60, seconds % 60),
        _ => format!("{}h{}m", seconds / 3600, (seconds % 3600) / 60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bandwidth_units() {
        assert_eq!(format_bandwidth(0), "0 B/s");
        assert_eq!(format_bandwidth(1023), "1023 B/s");
        assert_eq!(format_bandwidth(1024), "1.00 KB/s");
        assert_eq!(format_bandwidth(1536), "1.50 KB/s");
        assert_eq!(format_bandwidth(5 * 1024 * 1024), "5.00 MB/s");
        assert_eq!(format_bandwidth(u64::MAX), "16.00 EB/s");
    }

    #[test]
    fn byte_units_stop_at_terabytes() {
        assert_eq!(format_bytes(900), "900 B");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(3 * 1024u64.pow(4)), "3.00 TB");
        assert_eq!(format_bytes(2048 * 1024u64.pow(4)), "2048.00 TB");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_secs(59)), "59s");
        assert_eq!(format_duration(Duration::from_secs(187)), "3m7s");
        assert_eq!(format_duration(Duration::from_secs(2 * 3600 + 15 * 60 + 9)), "2h15m");
    }
}
