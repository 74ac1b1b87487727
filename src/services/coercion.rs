//! Standard coercions.
//!
//! Every function here returns a [`Coercion`] that can be attached to a field
//! with [`FieldSpec::coerce`](crate::domain::models::FieldSpec::coerce). The
//! numeric parsers never fail: unparseable input becomes `NaN`, which numeric
//! constraints then report as a violation. `split`, `parse_bool` and `trim`
//! are ordinary coercions and fail on input of the wrong shape.

use crate::domain::errors::CoercionError;
use crate::domain::models::{Coercion, Value};

/// Split a string on `delimiter` and trim whitespace around every element.
pub fn split(delimiter: impl Into<String>) -> Coercion {
    let delimiter = delimiter.into();
    let name = format!("split({delimiter})");
    let label = name.clone();
    Coercion::custom(name, move |value| match value {
        Value::Str(raw) => Ok(Value::List(split_trimmed(&raw, &delimiter))),
        other => Err(CoercionError::new(
            label.as_str(),
            format!("expected a string, got {}", other.kind()),
        )),
    })
}

/// Parse an integer in `base` (2..=36, or 0 to auto-detect a `0x` prefix).
pub fn parse_int(base: u32) -> Coercion {
    Coercion::custom(format!("parse_int({base})"), move |value| {
        Ok(match value {
            Value::Str(raw) => parse_int_prefix(&raw, base),
            Value::Int(n) => Value::Int(n),
            _ => Value::Float(f64::NAN),
        })
    })
}

/// [`parse_int`] in base 10.
pub fn parse_int_default() -> Coercion {
    parse_int(10)
}

/// Parse the longest leading decimal number, `NaN` if there is none.
pub fn parse_float() -> Coercion {
    Coercion::custom("parse_float", |value| {
        Ok(match value {
            Value::Str(raw) => Value::Float(parse_float_prefix(&raw)),
            Value::Int(n) => Value::Int(n),
            Value::Float(n) => Value::Float(n),
            _ => Value::Float(f64::NAN),
        })
    })
}

/// Accept `true/false`, `1/0`, `yes/no`, `on/off`, case-insensitively.
pub fn parse_bool() -> Coercion {
    Coercion::custom("parse_bool", |value| match value {
        Value::Str(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
            "false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
            _ => Err(CoercionError::new(
                "parse_bool",
                format!("{} is not a boolean", Value::Str(raw).inspect()),
            )),
        },
        Value::Bool(b) => Ok(Value::Bool(b)),
        other => Err(CoercionError::new(
            "parse_bool",
            format!("expected a string, got {}", other.kind()),
        )),
    })
}

/// Trim surrounding whitespace from a string, or from each string in a list.
pub fn trim() -> Coercion {
    Coercion::custom("trim", |value| Ok(trim_value(value)))
}

fn trim_value(value: Value) -> Value {
    match value {
        Value::Str(s) => Value::Str(s.trim().to_string()),
        Value::List(items) => Value::List(items.into_iter().map(trim_value).collect()),
        other => other,
    }
}

fn split_trimmed(raw: &str, delimiter: &str) -> Vec<Value> {
    if delimiter.is_empty() {
        return raw.chars().map(|c| Value::Str(c.to_string())).collect();
    }
    raw.split(delimiter)
        .map(|part| Value::Str(part.trim().to_string()))
        .collect()
}

/// Prefix integer parse: leading whitespace and sign allowed, digits are
/// consumed until the first character invalid in `base`.
fn parse_int_prefix(raw: &str, base: u32) -> Value {
    if base == 1 || base > 36 {
        return Value::Float(f64::NAN);
    }

    let mut rest = raw.trim_start();
    let negative = rest.starts_with('-');
    if negative || rest.starts_with('+') {
        rest = &rest[1..];
    }

    let mut radix = base;
    if radix == 0 || radix == 16 {
        if let Some(stripped) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
            rest = stripped;
            radix = 16;
        }
    }
    if radix == 0 {
        radix = 10;
    }

    let digits: Vec<u32> = rest.chars().map_while(|c| c.to_digit(radix)).collect();
    if digits.is_empty() {
        return Value::Float(f64::NAN);
    }

    let exact = digits
        .iter()
        .try_fold(0i128, |acc, &d| {
            acc.checked_mul(i128::from(radix))?.checked_add(i128::from(d))
        })
        .map(|n| if negative { -n } else { n })
        .and_then(|n| i64::try_from(n).ok());
    if let Some(n) = exact {
        return Value::Int(n);
    }

    // Out of i64 range: decimal text goes through the correctly rounded
    // float parser, other radices accumulate.
    let approx = if radix == 10 {
        rest[..digits.len()].parse::<f64>().unwrap_or(f64::NAN)
    } else {
        digits
            .iter()
            .fold(0f64, |acc, &d| acc.mul_add(f64::from(radix), f64::from(d)))
    };
    Value::Float(if negative { -approx } else { approx })
}

fn parse_float_prefix(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digit_count = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digit_count += frac_end - frac_start;
        if digit_count > 0 {
            end = frac_end;
        }
    }
    if digit_count == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Value {
        Value::from(v)
    }

    fn is_nan(value: &Value) -> bool {
        matches!(value, Value::Float(n) if n.is_nan())
    }

    #[test]
    fn test_split_trims_elements() {
        let result = split(",").apply(s("localhost:1010, localhost:2020")).unwrap();
        assert_eq!(
            result,
            Value::List(vec![s("localhost:1010"), s("localhost:2020")])
        );
    }

    #[test]
    fn test_split_matches_inline_transform() {
        let inline = Coercion::custom("inline", |value| match value {
            Value::Str(raw) => Ok(Value::List(
                raw.split(',').map(|v| Value::from(v.trim())).collect(),
            )),
            other => Ok(other),
        });
        let raw = s(" a ,b,, c ");
        assert_eq!(
            split(",").apply(raw.clone()).unwrap(),
            inline.apply(raw).unwrap()
        );
    }

    #[test]
    fn test_split_rejects_non_string() {
        let err = split(",").apply(Value::Int(1)).unwrap_err();
        assert_eq!(err.coercion, "split(,)");
        assert!(err.reason.contains("integer"));
    }

    #[test]
    fn test_parse_int_default_base() {
        assert_eq!(parse_int_default().apply(s("5000")).unwrap(), Value::Int(5000));
        assert_eq!(parse_int_default().apply(s("  -42")).unwrap(), Value::Int(-42));
        assert_eq!(parse_int_default().apply(s("50px")).unwrap(), Value::Int(50));
    }

    #[test]
    fn test_parse_int_unparseable_is_nan_not_error() {
        assert!(is_nan(&parse_int_default().apply(s("not-a-number")).unwrap()));
        assert!(is_nan(&parse_int_default().apply(s("")).unwrap()));
        assert!(is_nan(&parse_int_default().apply(Value::Bool(true)).unwrap()));
    }

    #[test]
    fn test_parse_int_other_bases() {
        assert_eq!(parse_int(16).apply(s("0xff")).unwrap(), Value::Int(255));
        assert_eq!(parse_int(16).apply(s("FF")).unwrap(), Value::Int(255));
        assert_eq!(parse_int(2).apply(s("1012")).unwrap(), Value::Int(5));
        assert_eq!(parse_int(0).apply(s("0x10")).unwrap(), Value::Int(16));
        assert_eq!(parse_int(0).apply(s("10")).unwrap(), Value::Int(10));
        assert!(is_nan(&parse_int(37).apply(s("10")).unwrap()));
        assert!(is_nan(&parse_int(8).apply(s("9")).unwrap()));
    }

    #[test]
    fn test_parse_int_overflow_degrades_to_float() {
        let value = parse_int_default()
            .apply(s("99999999999999999999"))
            .unwrap();
        assert_eq!(value, Value::Float(1e20));
    }

    #[test]
    fn test_parse_int_keeps_i64_bounds() {
        let parse = parse_int_default();
        assert_eq!(
            parse.apply(s("-9223372036854775808")).unwrap(),
            Value::Int(i64::MIN)
        );
        assert_eq!(
            parse.apply(s("9223372036854775807")).unwrap(),
            Value::Int(i64::MAX)
        );
        assert_eq!(
            parse.apply(s("-9223372036854775809")).unwrap(),
            Value::Float(-9_223_372_036_854_775_808.0)
        );
        assert_eq!(
            parse.apply(s("12345678901234567890123")).unwrap(),
            Value::Float(1.234_567_890_123_456_8e22)
        );
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float().apply(s("3.25")).unwrap(), Value::Float(3.25));
        assert_eq!(parse_float().apply(s(".5x")).unwrap(), Value::Float(0.5));
        assert_eq!(parse_float().apply(s("1e3ms")).unwrap(), Value::Float(1000.0));
        assert_eq!(parse_float().apply(s("2e")).unwrap(), Value::Float(2.0));
        assert_eq!(
            parse_float().apply(s("-Infinity")).unwrap(),
            Value::Float(f64::NEG_INFINITY)
        );
        assert!(is_nan(&parse_float().apply(s("abc")).unwrap()));
        assert!(is_nan(&parse_float().apply(s(".")).unwrap()));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool().apply(s("TRUE")).unwrap(), Value::Bool(true));
        assert_eq!(parse_bool().apply(s("off")).unwrap(), Value::Bool(false));
        let err = parse_bool().apply(s("maybe")).unwrap_err();
        assert_eq!(err.reason, "'maybe' is not a boolean");
    }

    #[test]
    fn test_trim() {
        assert_eq!(trim().apply(s("  x ")).unwrap(), s("x"));
        assert_eq!(trim().apply(Value::Int(1)).unwrap(), Value::Int(1));
    }
}
