use std::fmt;

use chrono::NaiveDateTime;

/// A loosely typed cell value as it comes out of an uploaded file.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl RawValue {
    /// Types a delimited-text field. Only a zero-length field is `Empty`;
    /// booleans are matched in exactly lower or upper case.
    pub fn coerce_text(field: &str) -> Self {
        match field {
            "" => return RawValue::Empty,
            "true" | "TRUE" => return RawValue::Bool(true),
            "false" | "FALSE" => return RawValue::Bool(false),
            _ => {}
        }
        match parse_numeric(field.trim()) {
            Some(number) => RawValue::Number(number),
            None => RawValue::Text(field.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RawValue::Empty)
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            RawValue::Empty => false,
            RawValue::Bool(value) => *value,
            RawValue::Number(value) => value.is_finite() && *value != 0.0,
            RawValue::Text(value) => !value.is_empty(),
            RawValue::DateTime(_) => true,
        }
    }

    /// Numeric reading used by the normalizer. Anything that does not
    /// look like a number reads as zero.
    pub fn as_number(&self) -> f64 {
        let value = match self {
            RawValue::Empty | RawValue::DateTime(_) => 0.0,
            RawValue::Bool(value) => {
                if *value {
                    1.0
                } else {
                    0.0
                }
            }
            RawValue::Number(value) => *value,
            RawValue::Text(value) => parse_numeric(value.trim()).unwrap_or(0.0),
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Empty => Ok(()),
            RawValue::Bool(value) => write!(f, "{value}"),
            RawValue::Number(value) => f.write_str(&format_number(*value)),
            RawValue::Text(value) => f.write_str(value),
            RawValue::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

/// One uploaded row, keyed by header label in header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    fields: Vec<(String, RawValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, value: RawValue) {
        self.fields.push((label.into(), value));
    }

    pub fn with(mut self, label: impl Into<String>, value: RawValue) -> Self {
        self.push(label, value);
        self
    }

    pub fn get(&self, label: &str) -> Option<&RawValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, label: &str) -> bool {
        self.fields.iter().any(|(key, _)| key == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn parse_numeric(text: &str) -> Option<f64> {
    if !looks_numeric(text) {
        return None;
    }
    text.parse::<f64>().ok()
}

// -?(digits[.digits]|.digits)([eE][+-]?digits)?
fn looks_numeric(text: &str) -> bool {
    let body = text.strip_prefix('-').unwrap_or(text);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
        None => (body, None),
    };

    let mut parts = mantissa.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next();
    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    let mantissa_ok = match fraction {
        Some(fraction) => {
            digits(whole) && digits(fraction) && !(whole.is_empty() && fraction.is_empty())
        }
        None => !whole.is_empty() && digits(whole),
    };
    if !mantissa_ok {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && digits(exp)
        }
    }
}
