//! Presentation helpers that never touch the network.

use crate::config::BASE_URL;
use serde_json::Value;

pub const CONTACT_FOR_PRICE: &str = "Contact for price";

const PESO_SIGN: char = '₱';

/// Builds the public asset URL for a file id on the given content service.
///
/// An absent or empty id yields `None`.
pub fn asset_url(base_url: &str, image_id: Option<&str>) -> Option<String> {
    match image_id {
        Some(id) if !id.is_empty() => {
            Some(format!("{}/assets/{}", base_url.trim_end_matches('/'), id))
        }
        _ => None,
    }
}

/// [`asset_url`] against the compiled-in content service.
pub fn get_image_url(image_id: Option<&str>) -> Option<String> {
    asset_url(BASE_URL, image_id)
}

/// Formats a price in Philippine Peso with en-US digit grouping.
///
/// Zero, NaN and absent prices are not public and render as
/// `"Contact for price"`.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p != 0.0 && !p.is_nan() => format!("{}{}", PESO_SIGN, group_thousands(p)),
        _ => CONTACT_FOR_PRICE.to_string(),
    }
}

/// Same as [`format_price`] for a raw JSON field, which may hold a number,
/// a numeric string or null.
pub fn format_price_value(price: &Value) -> String {
    let numeric = match price {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.is_empty() => Some(s.trim().parse::<f64>().unwrap_or(f64::NAN)),
        Value::Bool(true) => Some(1.0),
        _ => None,
    };
    format_price(numeric)
}

fn group_thousands(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    // en-US keeps at most three fraction digits.
    let rendered = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        "-"
    } else {
        ""
    };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}
