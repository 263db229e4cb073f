//! Centralized limits and formatting helpers.

/// Maximum number of chromosomes kept from one chromosome file (DOS protection).
///
/// Fragmented scaffold assemblies reach a few million entries.
pub const MAX_CHROMOSOMES: usize = 10_000_000;

/// Check if adding another chromosome would exceed `max`.
///
/// Call this with the current count BEFORE adding a new chromosome.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_chromosome_limit(count: usize, max: usize) -> Option<String> {
    if count >= max {
        Some(format!("Too many chromosomes: adding another would exceed maximum of {max}"))
    } else {
        None
    }
}

/// Insert thousands separators into an integer.
///
/// # Examples
///
/// ```
/// use gmap_datatypes::utils::validation::commaify;
///
/// assert_eq!(commaify(7), "7");
/// assert_eq!(commaify(1234567), "1,234,567");
/// ```
#[must_use]
pub fn commaify(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Human readable byte count, e.g. `512 bytes` or `1.5 KB`
#[must_use]
pub fn nice_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];

    if bytes < 1024 {
        return format!("{bytes} bytes");
    }

    #[allow(clippy::cast_precision_loss)] // Display only
    let mut size = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if size < 1024.0 {
            break;
        }
        size /= 1024.0;
        unit = next;
    }
    format!("{size:.1} {unit}")
}
