//! JSON rendering of command results.
//!
//! The engine works with full-precision amounts; rounding happens here and
//! nowhere else.
use serde::Serialize;
use serde_json::{Number, Value};

use crate::{currency::Currency, error::Result};

/// What every command prints: the result plus the context needed to read it.
#[derive(Debug, Serialize)]
pub struct Report<T> {
    pub currency: Currency,
    pub duration_months: i32,
    pub data: T,
}

/// Pretty JSON with every non-integer number rounded to `decimals` places.
pub fn render<T: Serialize>(report: &Report<T>, decimals: u32) -> Result<String> {
    let mut value = serde_json::to_value(report)?;
    round_numbers(&mut value, decimals);
    Ok(serde_json::to_string_pretty(&value)?)
}

fn round_numbers(value: &mut Value, decimals: u32) {
    match value {
        Value::Number(number) if number.is_f64() => {
            if let Some(rounded) = number
                .as_f64()
                .map(|n| round_to(n, decimals))
                .and_then(Number::from_f64)
            {
                *number = rounded;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(|item| round_numbers(item, decimals)),
        Value::Object(fields) => fields
            .values_mut()
            .for_each(|field| round_numbers(field, decimals)),
        _ => {}
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() { rounded } else { value }
}
