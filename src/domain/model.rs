use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// One entry of a content collection (tire, mag, gallery entry, service).
///
/// Fields are passed through untouched; the client only ever reads a few of
/// them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    pub fields: Map<String, Value>,
}

impl Item {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn status(&self) -> Option<&str> {
        self.get("status").and_then(Value::as_str)
    }

    /// Items with a truthy `original_price` are marked down.
    pub fn is_on_sale(&self) -> bool {
        self.get("original_price").is_some_and(is_truthy)
    }

    /// `rim_size` read the way a lenient integer parse would, `None` when
    /// missing or unparseable.
    pub fn rim_size(&self) -> Option<i64> {
        match self.get("rim_size")? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
            Value::String(s) => parse_leading_int(s),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for Item {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// The content service wraps every payload as `{ "data": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Outcome of a write. Reads swallow failures; writes report them.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationResult {
    Success { data: Value },
    Failure { error: String },
}

impl MutationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, MutationResult::Success { .. })
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            MutationResult::Success { data } => Some(data),
            MutationResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            MutationResult::Success { .. } => None,
            MutationResult::Failure { error } => Some(error),
        }
    }
}

impl Serialize for MutationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MutationResult", 2)?;
        match self {
            MutationResult::Success { data } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            MutationResult::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

/// JavaScript-style truthiness for JSON values.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Leading whitespace, an optional sign, then as many digits as present.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> Item {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_rim_size_parsing() {
        assert_eq!(item(json!({"rim_size": "17"})).rim_size(), Some(17));
        assert_eq!(item(json!({"rim_size": " 18 inch"})).rim_size(), Some(18));
        assert_eq!(item(json!({"rim_size": "15.5"})).rim_size(), Some(15));
        assert_eq!(item(json!({"rim_size": 16})).rim_size(), Some(16));
        assert_eq!(item(json!({"rim_size": 19.9})).rim_size(), Some(19));
        assert_eq!(item(json!({"rim_size": "R17"})).rim_size(), None);
        assert_eq!(item(json!({"rim_size": ""})).rim_size(), None);
        assert_eq!(item(json!({"rim_size": null})).rim_size(), None);
        assert_eq!(item(json!({})).rim_size(), None);
    }

    #[test]
    fn test_is_on_sale() {
        assert!(item(json!({"original_price": 5000})).is_on_sale());
        assert!(item(json!({"original_price": "5000"})).is_on_sale());
        assert!(!item(json!({"original_price": 0})).is_on_sale());
        assert!(!item(json!({"original_price": null})).is_on_sale());
        assert!(!item(json!({"original_price": ""})).is_on_sale());
        assert!(!item(json!({"name": "no price"})).is_on_sale());
    }

    #[test]
    fn test_item_is_transparent() {
        let raw = json!({"id": 7, "status": "available"});
        let parsed = item(raw.clone());
        assert_eq!(parsed.status(), Some("available"));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
    }

    #[test]
    fn test_mutation_result_serialization() {
        let ok = MutationResult::Success {
            data: json!({"id": 1}),
        };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"success": true, "data": {"id": 1}})
        );

        let failed = MutationResult::Failure {
            error: "HTTP error! status: 500".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"success": false, "error": "HTTP error! status: 500"})
        );
        assert!(!failed.is_success());
        assert_eq!(failed.data(), None);
    }
}
