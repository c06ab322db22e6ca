//! Fixed-point rendering of derived numbers.
//!
//! Output must be stable for golden comparisons: the nearest decimal is
//! chosen from the exact binary value, and exact ties round away from zero.

/// Digits printed past the requested precision when probing for a tie.
const TIE_PROBE_DIGITS: usize = 40;

/// Render `value` with exactly `digits` decimals.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let probe = format!("{:.*}", digits + TIE_PROBE_DIGITS, value);
    let (head, tail) = probe.split_at(probe.len() - TIE_PROBE_DIGITS);
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    if is_tie {
        // `head` is the exact value truncated toward zero.
        increment_magnitude(head.trim_end_matches('.'))
    } else {
        format!("{:.*}", digits, value)
    }
}

/// One-decimal average of `total` over `games`, `"0.0"` with no games.
pub fn format_average(total: i64, games: u32) -> String {
    if games == 0 {
        return "0.0".to_string();
    }
    to_fixed(total as f64 / games as f64, 1)
}

/// Add one unit in the last place to a decimal string, away from zero.
fn increment_magnitude(number: &str) -> String {
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };

    let mut bytes = digits.as_bytes().to_vec();
    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        if !carry {
            break;
        }
        match *b {
            b'.' => continue,
            b'9' => *b = b'0',
            _ => {
                *b += 1;
                carry = false;
            }
        }
    }

    let mut out = String::with_capacity(number.len() + 1);
    out.push_str(sign);
    if carry {
        out.push('1');
    }
    out.push_str(&String::from_utf8_lossy(&bytes));
    out
}
