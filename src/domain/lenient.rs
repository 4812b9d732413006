//! Best-effort wrappers for backend documents.
//!
//! Backend payloads are only loosely typed: numbers arrive as strings, lists
//! arrive as `null`, objects go missing. The wrappers below never fail to
//! deserialize; anything they cannot interpret collapses to a default so a
//! partially-populated document still yields a usable view model.

use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// Leaf value of unknown JSON type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scalar(Value);

impl Scalar {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    /// Whether the key was absent or explicitly `null`.
    pub fn is_missing(&self) -> bool {
        self.0.is_null()
    }

    /// Truthiness as the portal front end evaluates it: `null`, `false`,
    /// zero, NaN and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// Rendered value when truthy.
    pub fn truthy_text(&self) -> Option<String> {
        self.is_truthy().then(|| self.render())
    }

    /// Rendered value, or the empty string when falsy.
    pub fn text(&self) -> String {
        self.truthy_text().unwrap_or_default()
    }

    /// Rendered value, or `fallback` when falsy.
    pub fn text_or(&self, fallback: &str) -> String {
        self.truthy_text().unwrap_or_else(|| fallback.to_string())
    }

    /// Rendered value whenever the key is present, even when falsy.
    pub fn present_text(&self) -> Option<String> {
        (!self.is_missing()).then(|| self.render())
    }

    /// Numeric view accepting both JSON numbers and numeric strings.
    pub fn as_f64(&self) -> Option<f64> {
        match &self.0 {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match &self.0 {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn render(&self) -> String {
        match &self.0 {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Number(n) => render_number(n),
            other => other.to_string(),
        }
    }
}

/// Integral floats print without a trailing `.0`, matching how the portal
/// shows areas such as `120`.
fn render_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

/// Object or optional object that falls back to `T::default()` when the
/// payload has the wrong shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lenient<T>(pub T);

impl<'de, T> Deserialize<'de> for Lenient<T>
where
    T: DeserializeOwned + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self(T::deserialize(value).unwrap_or_default()))
    }
}

impl<T: Serialize> Serialize for Lenient<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Deref for Lenient<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// List that tolerates a non-array payload (read as empty) and malformed
/// elements (read as `T::default()`).
#[derive(Clone, Debug, PartialEq)]
pub struct LenientVec<T>(pub Vec<T>);

impl<T> Default for LenientVec<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, T> Deserialize<'de> for LenientVec<T>
where
    T: DeserializeOwned + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| T::deserialize(item).unwrap_or_default())
                .collect(),
            _ => Vec::new(),
        };
        Ok(Self(items))
    }
}

impl<T: Serialize> Serialize for LenientVec<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Deref for LenientVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> From<Vec<T>> for LenientVec<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}
