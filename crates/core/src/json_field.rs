//! Tolerant field access over loosely-typed JSON objects.
//!
//! The remote project schema is owned by another service and evolves
//! independently, so every read goes through [`Fields`], which never
//! fails: a missing or mistyped value yields the zero value of the
//! requested type. Lenient coercions are applied where the server has
//! historically been inconsistent (numbers sent as strings, booleans
//! sent as `"true"`).

use serde_json::{Map, Value};

/// Read-only view over a JSON object with defaulting accessors.
///
/// Wrapping a non-object value is allowed; every accessor then returns
/// its default.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Fields<'a> {
    pub fn of(value: &'a Value) -> Self {
        Self {
            map: value.as_object(),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|m| m.get(key))
    }

    /// String value; numbers and booleans are rendered as text, anything
    /// else (including `null`) yields `""`.
    pub fn string(&self, key: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Tri-state string: `None` for an explicit `null`, `Some("")` when
    /// the key is missing, otherwise the [`string`](Self::string) value.
    /// An object or array is not rendered as JSON text; it yields `Some("")`.
    pub fn tristate_string(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(Value::Null) => None,
            _ => Some(self.string(key)),
        }
    }

    /// 64-bit integer; fractional values truncate toward zero.
    pub fn long(&self, key: &str) -> i64 {
        match self.get(key) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(truncate_to_i64))
                .unwrap_or(0),
            Some(Value::String(s)) => parse_long(s).unwrap_or(0),
            _ => 0,
        }
    }

    /// 32-bit integer; values outside the `i32` range yield 0.
    pub fn int(&self, key: &str) -> i32 {
        i32::try_from(self.long(key)).unwrap_or(0)
    }

    /// Finite floating point value, 0.0 otherwise.
    pub fn double(&self, key: &str) -> f64 {
        let value = match self.get(key) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        value.filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    pub fn float(&self, key: &str) -> f32 {
        let v = self.double(key) as f32;
        if v.is_finite() {
            v
        } else {
            0.0
        }
    }

    /// Boolean; the strings `"true"` / `"false"` are accepted in any case.
    pub fn boolean(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// Array elements, or `None` when the key is missing or not an array.
    pub fn array(&self, key: &str) -> Option<&'a [Value]> {
        self.get(key).and_then(Value::as_array).map(Vec::as_slice)
    }

    /// Nested object, or `None` when the key is missing or not an object.
    pub fn object(&self, key: &str) -> Option<&'a Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }
}

fn truncate_to_i64(v: f64) -> Option<i64> {
    // i64::MAX is not exactly representable; the upper bound is exclusive.
    if v.is_finite() && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Some(v.trunc() as i64)
    } else {
        None
    }
}

fn parse_long(s: &str) -> Option<i64> {
    let s = s.trim();
    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(truncate_to_i64))
}
