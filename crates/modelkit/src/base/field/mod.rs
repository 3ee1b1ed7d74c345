//! Leaf field kinds: scalar validators built on the core `Field` contract.

mod boolean;
mod email;
mod enumeration;
mod integer;
mod number;
mod string;

pub use boolean::BooleanField;
pub use email::{EmailField, EmailParams};
pub use enumeration::{EnumField, EnumParams};
pub use integer::{IntegerField, IntegerParams};
pub use number::{NumberField, NumberParams};
pub use string::{StringField, StringParams};

use crate::core::Value;

// Largest magnitude at which every integer is exactly representable as f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Numeric value of a JSON number or a numeric string.
///
/// Strings must be a complete literal once surrounding whitespace is removed:
/// decimal with optional sign and exponent, or an unsigned `0x`/`0o`/`0b`
/// integer. Anything else (including `Infinity` and the empty string) yields
/// `None`.
pub(crate) fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if let Some(n) = parse_radix(s) {
                return Some(n);
            }
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit() || b"+-.eE".contains(&b)) {
                return None;
            }
            s.parse::<f64>().ok()
        }
        _ => None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn parse_radix(s: &str) -> Option<f64> {
    let radix = match s.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    u128::from_str_radix(digits, radix).ok().map(|n| n as f64)
}

/// Emit `n` as a JSON integer when it is integral and exactly representable.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn number_value(n: f64) -> Value {
    if is_safe_integer(n) {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

/// Render a bound the way it appears in messages: `10`, not `10.0`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn format_number(n: f64) -> String {
    if is_safe_integer(n) {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

fn is_safe_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER
}

///
/// TESTS
///
