//! Fixed-point amount helpers.
//!
//! All monetary amounts in this system use a 1e-6 (micros) fixed-point
//! representation stored as `i64`: 1 currency unit = 1_000_000 micros.
//! Threshold comparisons stay exact integer comparisons; the float and
//! string conversions below exist only at the wire/CLI boundary.

/// 1e-6 fixed-point scale.
pub const MICROS_SCALE: i64 = 1_000_000;

/// Convert a wire float (e.g. a JSON number) into micros, rounding to the
/// nearest micro.
///
/// Returns `None` for non-finite inputs and for values outside the `i64`
/// micros range.
pub fn amount_micros_from_f64(amount: f64) -> Option<i64> {
    if !amount.is_finite() {
        return None;
    }
    let scaled = amount * MICROS_SCALE as f64;
    if scaled >= i64::MAX as f64 || scaled <= i64::MIN as f64 {
        return None;
    }
    Some(scaled.round() as i64)
}

/// Parse a decimal string ("2500", "12.5", "-0.25") into micros.
///
/// At most six fractional digits are accepted (the micros resolution);
/// anything else — empty input, stray characters, a seventh fractional
/// digit, overflow — returns `None`.
pub fn parse_amount_micros(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f),
        None => (digits, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
        || frac_part.len() > 6
    {
        return None;
    }

    let int_val: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };
    let mut frac_val: i64 = if frac_part.is_empty() {
        0
    } else {
        frac_part.parse().ok()?
    };
    for _ in frac_part.len()..6 {
        frac_val *= 10;
    }

    let total = int_val
        .checked_mul(MICROS_SCALE)?
        .checked_add(frac_val)?;
    Some(if negative { -total } else { total })
}

/// Render micros as a decimal string with six fractional digits.
pub fn format_amount_micros(micros: i64) -> String {
    let units = micros / MICROS_SCALE;
    let frac = (micros % MICROS_SCALE).abs();
    // When |value| < 1 unit and value is negative, `units` truncates to 0,
    // losing the sign.  Emit "-0" explicitly in that case.
    if micros < 0 && units == 0 {
        format!("-{units}.{frac:06}")
    } else {
        format!("{units}.{frac:06}")
    }
}
