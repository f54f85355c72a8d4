//! Turns one record value into display text, steered by the placeholder
//! that asked for it.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::value::Value;

/// `<field name> <op> <number>`, e.g. `number + 5` or `price * 1.5`.
static ARITHMETIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9 _-]+)\s*([+\-*/])\s*([0-9.]+)$").expect("arithmetic pattern is valid")
});

/// Format `value` for `placeholder`, the raw text between the braces.
///
/// The placeholder's lower-cased prefix picks the treatment:
/// `location...` selects city/country/continent/address, `name...` selects
/// first/last/full, `number|count|dollars|price...` allows one arithmetic
/// operation, `date...` gives "3rd of June 2024" and `year...` the year.
/// Everything else, and every shape mismatch, is the value's plain display.
pub fn format_value(value: &Value, placeholder: &str) -> String {
    let key = placeholder.trim().to_lowercase();

    if key.starts_with("location") {
        if let Value::Location(location) = value {
            return if key.contains("city") {
                location.city.clone()
            } else if key.contains("country") {
                location.country.clone()
            } else if key.contains("continent") {
                location.continent.clone()
            } else {
                location.address.clone()
            };
        }
    } else if key.starts_with("name") {
        if let Value::Name(name) = value {
            return if key.contains("last") {
                name.last.clone()
            } else if key.contains("first") {
                name.first.clone()
            } else {
                name.full.clone()
            };
        }
    } else if ["number", "count", "dollars", "price"]
        .iter()
        .any(|prefix| key.starts_with(prefix))
    {
        return evaluate_arithmetic(value, placeholder.trim()).unwrap_or_else(|| value.to_string());
    } else if key.starts_with("date") {
        if let Value::Date(date) = value {
            return long_date(date);
        }
    } else if key.starts_with("year") {
        if let Value::Date(date) = value {
            return date.year().to_string();
        }
    }

    value.to_string()
}

/// Apply the placeholder's arithmetic suffix, if it has a well-formed one
/// and the value is numeric.
fn evaluate_arithmetic(value: &Value, placeholder: &str) -> Option<String> {
    let caps = ARITHMETIC.captures(placeholder)?;
    let lhs = value.as_number()?;
    let rhs: f64 = caps[3].parse().ok()?;
    let result = match &caps[2] {
        "+" => lhs + rhs,
        "-" => lhs - rhs,
        "*" => lhs * rhs,
        "/" if rhs != 0.0 => lhs / rhs,
        _ => return None,
    };
    if !result.is_finite() {
        return None;
    }
    Some(number_text(result))
}

/// Whole numbers print without a fraction, everything else as the
/// shortest decimal that round-trips.
fn number_text(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// "3rd of June 2024"
pub fn long_date(date: &NaiveDate) -> String {
    format!("{} of {}", ordinal(date.day()), date.format("%B %Y"))
}

pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
