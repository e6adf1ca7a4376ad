//! Byte-size and throughput formatting.

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count using the largest unit that keeps the mantissa
/// at or above 1, with two decimal places. Zero formats as "0 B".
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// Throughput in megabytes per second; 0 when either operand is
/// non-positive.
pub fn throughput_mbs(bytes: u64, elapsed_ms: u64) -> f64 {
    if bytes == 0 || elapsed_ms == 0 {
        return 0.0;
    }
    let megabytes = bytes as f64 / (1024.0 * 1024.0);
    let seconds = elapsed_ms as f64 / 1000.0;
    megabytes / seconds
}
