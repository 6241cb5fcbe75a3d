use tracing::warn;

use crate::error::AsmError;

/// Reads the leading base-10 integer of `token` and checks it against the
/// open range `(min, max)`; both bounds themselves are rejected.
///
/// Leading whitespace and a single `+`/`-` sign are accepted. Anything after
/// the digits is ignored.
pub fn read_integer(token: &str, min: i64, max: i64) -> Result<i64, AsmError> {
    bounded(token, token, min, max)
}

/// Reads `r<N>` or `$<N>` (prefix case-insensitive) with `0 <= N < num_registers`.
pub fn read_register(token: &str, num_registers: u32) -> Result<u32, AsmError> {
    let mut chars = token.chars();
    match chars.next() {
        Some('r' | 'R' | '$') => {
            let n = bounded(token, chars.as_str(), -1, i64::from(num_registers))?;
            Ok(n as u32)
        }
        _ => Err(AsmError::Syntax {
            token: token.to_string(),
            reason: "register token not starting with r or $",
        }),
    }
}

pub(crate) fn check_range(value: i64, min: i64, max: i64, token: &str) -> Result<i64, AsmError> {
    if value <= min || value >= max {
        return Err(AsmError::Range {
            token: token.to_string(),
            min,
            max,
        });
    }
    Ok(value)
}

// `shown` is what error messages name; `text` is what gets parsed.
fn bounded(shown: &str, text: &str, min: i64, max: i64) -> Result<i64, AsmError> {
    let (value, rest) = match leading_integer(text) {
        Some(Ok(parsed)) => parsed,
        Some(Err(())) => {
            return Err(AsmError::Range {
                token: shown.to_string(),
                min,
                max,
            })
        }
        None => {
            return Err(AsmError::Syntax {
                token: shown.to_string(),
                reason: "integer is NaN",
            })
        }
    };
    if !rest.is_empty() {
        warn!(token = shown, ignored = rest, "trailing characters after integer ignored");
    }
    check_range(value, min, max, shown)
}

/// `None` when no digit is consumed, `Some(Err(()))` on i64 overflow.
fn leading_integer(text: &str) -> Option<Result<(i64, &str), ()>> {
    let s = text.trim_start();
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }

    // Accumulate towards the sign so i64::MIN stays representable.
    let mut acc: i64 = 0;
    for b in unsigned[..len].bytes() {
        let digit = i64::from(b - b'0');
        let next = acc.checked_mul(10).and_then(|a| {
            if negative {
                a.checked_sub(digit)
            } else {
                a.checked_add(digit)
            }
        });
        match next {
            Some(v) => acc = v,
            None => return Some(Err(())),
        }
    }
    Some(Ok((acc, &unsigned[len..])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_integer_forms() {
        assert_eq!(leading_integer("42"), Some(Ok((42, ""))));
        assert_eq!(leading_integer("  -7"), Some(Ok((-7, ""))));
        assert_eq!(leading_integer("+3x"), Some(Ok((3, "x"))));
        assert_eq!(leading_integer("-9223372036854775808"), Some(Ok((i64::MIN, ""))));
        assert_eq!(leading_integer("9223372036854775808"), Some(Err(())));
        assert_eq!(leading_integer("-"), None);
        assert_eq!(leading_integer("x1"), None);
        assert_eq!(leading_integer(""), None);
    }
}
