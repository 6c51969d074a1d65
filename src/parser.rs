//! Magnitude extraction for unit-suffixed specification strings.
//!
//! Scraped and hand-entered values look like `"118 bhp @ 5500 rpm"`, `"1199 cc"`,
//! `"1.2L Turbocharged Revotron"` or `"44 litres"`. Scoring only ever needs the
//! leading number.

/// Returns the numeric magnitude at the start of a specification string.
///
/// The first whitespace-separated token is read up to the end of its longest
/// numeric prefix, so `"1.2L"` yields `1.2` and `"3993mm"` yields `3993`.
/// Empty strings, non-numeric tokens and non-finite results all yield `0.0`.
pub fn extract_magnitude(spec: &str) -> f64 {
    let token = match spec.split_whitespace().next() {
        Some(t) => t,
        None => return 0.0,
    };

    let end = numeric_prefix_len(token);
    if end == 0 {
        return 0.0;
    }

    match token[..end].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

// Length in bytes of the longest prefix shaped like `[+-]digits[.digits][e[+-]digits]`.
fn numeric_prefix_len(token: &str) -> usize {
    let bytes = token.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    // Exponent only counts when followed by at least one digit ("5e" stays "5").
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}
