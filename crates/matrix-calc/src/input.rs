//! Parsing of raw cell text typed into an operand grid.

/// Parse the longest numeric prefix of `raw`, the way a browser number field
/// does: leading whitespace is skipped, trailing garbage is ignored, and
/// `Infinity` is accepted. Returns `None` when no number can be read.
///
/// ```
/// use matrix_calc::input::parse_number;
/// assert_eq!(parse_number(" 2.5kg"), Some(2.5));
/// assert_eq!(parse_number("1e3"), Some(1000.0));
/// assert_eq!(parse_number("-"), None);
/// ```
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return None;
    }

    // An exponent only counts when at least one digit follows it.
    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Value stored for a cell edit. Unparseable input becomes `0.0`.
pub fn parse_cell(raw: &str) -> f64 {
    match parse_number(raw) {
        Some(value) if !value.is_nan() => value,
        _ => {
            log::trace!("Cell input {:?} is not a number, storing 0", raw);
            0.0
        }
    }
}
