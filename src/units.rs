//! Unit Normalization
//!
//! The Spectrum Virtualize REST API reports most numbers as quoted strings, and
//! sizes and link speeds with human-readable suffixes. These helpers convert them
//! into the base units Prometheus expects (bytes, bits per second).
//!
//! - Byte sizes (`"10TiB"`, `"9.94TB"`, `"512.00MB"`) are always base 1024,
//!   matching how the array's CLI formats capacities.
//! - Port speeds (`"8Gb"`, `"10Gb/s"`, `"100Mb/s"`) are decimal (SI) bits.

use thiserror::Error;

/// Fibre Channel port speeds, e.g. `"16Gb"`
pub const FC_SPEED_UNITS: &[(&str, u64)] = &[("Gb", 1_000_000_000)];

/// Ethernet port speeds, e.g. `"10Gb/s"` or `"100Mb/s"`
pub const IP_SPEED_UNITS: &[(&str, u64)] = &[("Gb/s", 1_000_000_000), ("Mb/s", 1_000_000)];

// More fraction digits than this cannot change the result of a u64 byte count.
const MAX_FRACTION_DIGITS: usize = 20;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitError {
    #[error("empty value")]
    Empty,

    #[error("invalid number in {0:?}")]
    InvalidNumber(String),

    #[error("missing unit in {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in {value:?}")]
    UnknownUnit { unit: String, value: String },

    #[error("value {0:?} does not fit in 64 bits")]
    Overflow(String),
}

fn base2_multiplier(unit: &str) -> Option<u128> {
    let exponent = match unit {
        "B" => 0,
        "KiB" | "kiB" | "KB" | "kB" => 1,
        "MiB" | "MB" => 2,
        "GiB" | "GB" => 3,
        "TiB" | "TB" => 4,
        "PiB" | "PB" => 5,
        "EiB" | "EB" => 6,
        _ => return None,
    };
    Some(1u128 << (10 * exponent))
}

/// Parses a base-2 byte size such as `"10TiB"` or `"1GB512MB"` into bytes.
///
/// The value is one or more `<decimal><unit>` segments whose sizes are summed.
/// Fractional bytes are truncated. A bare `"0"` is accepted as zero.
pub fn parse_base2_bytes(raw: &str) -> Result<u64, UnitError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(UnitError::Empty);
    }
    if value == "0" {
        return Ok(0);
    }

    let mut rest = value;
    let mut total: u128 = 0;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);

        if number.is_empty() || number == "." {
            return Err(UnitError::InvalidNumber(value.to_string()));
        }
        if unit.is_empty() {
            return Err(UnitError::MissingUnit(value.to_string()));
        }
        let multiplier = base2_multiplier(unit).ok_or_else(|| UnitError::UnknownUnit {
            unit: unit.to_string(),
            value: value.to_string(),
        })?;

        let segment = scale_decimal(number, multiplier)
            .ok_or_else(|| UnitError::InvalidNumber(value.to_string()))?;
        total = total
            .checked_add(segment)
            .ok_or_else(|| UnitError::Overflow(value.to_string()))?;
        rest = next;
    }

    u64::try_from(total).map_err(|_| UnitError::Overflow(value.to_string()))
}

/// Multiplies a plain decimal string (`"9"`, `"9.94"`, `".5"`) by `multiplier`,
/// truncating toward zero.
fn scale_decimal(number: &str, multiplier: u128) -> Option<u128> {
    let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
    if frac_part.contains('.') {
        return None;
    }

    let int_value: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };
    let mut scaled = int_value.checked_mul(multiplier)?;

    let frac_part = &frac_part[..frac_part.len().min(MAX_FRACTION_DIGITS)];
    if !frac_part.is_empty() {
        let frac_value: u128 = frac_part.parse().ok()?;
        let denominator = 10u128.pow(frac_part.len() as u32);
        scaled = scaled.checked_add(frac_value.checked_mul(multiplier)? / denominator)?;
    }
    Some(scaled)
}

/// Converts a port speed string to bits per second using a suffix table.
///
/// The prefix before the suffix must be a whole number. Anything that does not
/// match a listed suffix, including an empty or unsuffixed string, yields 0.
pub fn parse_port_speed(raw: &str, units: &[(&str, u64)]) -> u64 {
    units
        .iter()
        .find_map(|(suffix, multiplier)| {
            raw.strip_suffix(suffix)
                .and_then(|number| number.parse::<u64>().ok())
                .map(|n| n.saturating_mul(*multiplier))
        })
        .unwrap_or(0)
}

/// Parses a string-encoded integer field such as `stat_current` or `vdisk_count`.
pub fn parse_int(raw: &str) -> Result<i64, UnitError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(UnitError::Empty);
    }
    value
        .parse()
        .map_err(|_| UnitError::InvalidNumber(value.to_string()))
}
