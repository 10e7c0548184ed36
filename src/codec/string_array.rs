use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};
use sqlx::ValueRef;
use std::convert::Infallible;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use crate::codec;
use crate::error::ArrayError;

/// In-memory form of a text-array column such as `urlsBefore`.
///
/// Loads from whatever the storage layer produced for the column and writes
/// back as array-literal text. Bound to Postgres as `TEXT`: select array
/// columns with a `::text` cast and write them with `$n::text[]`. A SQL
/// `NULL` cell decodes to the empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StringArray(Vec<String>);

impl StringArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse stored array-literal text.
    pub fn from_text(text: &str) -> Self {
        Self(codec::decode(text))
    }

    /// Parse a nullable column; `None` is the empty list.
    pub fn from_column(text: Option<&str>) -> Self {
        Self(codec::decode(text))
    }

    /// Materialise from a dynamic column value.
    ///
    /// `null` is an empty list, strings are array-literal text and arrays of
    /// integers in `0..=255` are raw column bytes. Every other kind is a
    /// caller contract violation.
    pub fn scan(source: &Value) -> Result<Self, ArrayError> {
        match source {
            Value::Null => Ok(Self::default()),
            Value::String(text) => Ok(Self::from_text(text)),
            Value::Array(items) => match raw_bytes(items) {
                Some(bytes) => Ok(Self(codec::decode_bytes(&bytes))),
                None => Err(unsupported(source)),
            },
            _ => Err(unsupported(source)),
        }
    }

    /// Array-literal text to persist.
    pub fn value(&self) -> String {
        codec::encode(&self.0)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

fn raw_bytes(items: &[Value]) -> Option<Vec<u8>> {
    items
        .iter()
        .map(|item| item.as_u64().and_then(|n| u8::try_from(n).ok()))
        .collect()
}

fn unsupported(source: &Value) -> ArrayError {
    let kind = match source {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    tracing::warn!("Cannot scan {} into a text array", kind);
    ArrayError::unsupported(kind)
}

impl Deref for StringArray {
    type Target = Vec<String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for StringArray {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<String>> for StringArray {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl From<StringArray> for Vec<String> {
    fn from(array: StringArray) -> Self {
        array.0
    }
}

impl<S: Into<String>> FromIterator<S> for StringArray {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for StringArray {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StringArray {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for StringArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}

impl FromStr for StringArray {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_text(s))
    }
}

// API payloads carry the list as a plain JSON array; `null` means empty.
impl Serialize for StringArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StringArray {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Option::<Vec<String>>::deserialize(deserializer)?;
        Ok(Self(values.unwrap_or_default()))
    }
}

impl sqlx::Type<Postgres> for StringArray {
    fn type_info() -> PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl sqlx::Encode<'_, Postgres> for StringArray {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> IsNull {
        <String as sqlx::Encode<'_, Postgres>>::encode(self.value(), buf)
    }
}

impl<'r> sqlx::Decode<'r, Postgres> for StringArray {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        if value.is_null() {
            return Ok(Self::from_column(None));
        }
        let text = <&str as sqlx::Decode<'r, Postgres>>::decode(value)?;
        Ok(Self::from_column(Some(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scan_null_is_empty() {
        assert!(StringArray::scan(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn scan_text_decodes() {
        let array = StringArray::scan(&json!("{Pole-12,Pole-07}")).unwrap();
        assert_eq!(array.as_slice(), ["Pole-12", "Pole-07"]);
    }

    #[test]
    fn scan_raw_bytes_decodes() {
        let bytes: Vec<Value> = b"{a,\"b c\"}".iter().map(|b| json!(b)).collect();
        let array = StringArray::scan(&Value::Array(bytes)).unwrap();
        assert_eq!(array.as_slice(), ["a", "b c"]);
    }

    #[test]
    fn scan_rejects_other_kinds() {
        assert_eq!(StringArray::scan(&json!(42)), Err(ArrayError::unsupported("number")));
        assert_eq!(StringArray::scan(&json!(true)), Err(ArrayError::unsupported("bool")));
        assert_eq!(StringArray::scan(&json!({"a": 1})), Err(ArrayError::unsupported("object")));
        assert_eq!(StringArray::scan(&json!(["a", "b"])), Err(ArrayError::unsupported("array")));
        assert_eq!(StringArray::scan(&json!([1, 256])), Err(ArrayError::unsupported("array")));
    }

    #[test]
    fn value_and_display_are_encoded_text() {
        let array: StringArray = ["a,b", ""].into_iter().collect();
        assert_eq!(array.value(), r#"{"a,b",""}"#);
        assert_eq!(array.to_string(), array.value());
        assert_eq!(StringArray::new().value(), "{}");
    }

    #[test]
    fn from_str_and_from_column() {
        let parsed: StringArray = "{x,y}".parse().unwrap();
        assert_eq!(parsed.into_inner(), vec!["x".to_string(), "y".to_string()]);
        assert!(StringArray::from_column(None).is_empty());
        assert_eq!(StringArray::from_column(Some("{z}")).as_slice(), ["z"]);
    }

    #[test]
    fn mutation_through_deref() {
        let mut array = StringArray::from_text("{a}");
        array.push("b c".to_string());
        assert_eq!(array.value(), r#"{a,"b c"}"#);
    }

    #[test]
    fn null_cell_reads_as_empty_list() {
        // the sqlx decode path maps a NULL cell through from_column(None)
        assert_eq!(StringArray::from_column(None), StringArray::new());
        assert_eq!(StringArray::from_column(None).value(), "{}");
    }

    #[test]
    fn binds_as_postgres_text() {
        let text = <String as sqlx::Type<Postgres>>::type_info();
        assert_eq!(<StringArray as sqlx::Type<Postgres>>::type_info(), text);
        assert!(<StringArray as sqlx::Type<Postgres>>::compatible(&text));

        let int4 = <i32 as sqlx::Type<Postgres>>::type_info();
        assert!(!<StringArray as sqlx::Type<Postgres>>::compatible(&int4));
    }

    #[test]
    fn encode_writes_array_literal_text() {
        let array: StringArray = ["Pole-12", "has space"].into_iter().collect();
        let mut buf = PgArgumentBuffer::default();
        let is_null = <StringArray as sqlx::Encode<'_, Postgres>>::encode_by_ref(&array, &mut buf);

        assert!(matches!(is_null, IsNull::No));
        assert_eq!(&buf[..], array.value().as_bytes());
        assert_eq!(&buf[..], br#"{Pole-12,"has space"}"#);
    }

    #[test]
    fn empty_array_encodes_as_braces_not_null() {
        let mut buf = PgArgumentBuffer::default();
        let is_null = <StringArray as sqlx::Encode<'_, Postgres>>::encode_by_ref(&StringArray::new(), &mut buf);
        assert!(matches!(is_null, IsNull::No));
        assert_eq!(&buf[..], b"{}");
    }

    #[test]
    fn serde_uses_plain_json_arrays() {
        let array = StringArray::from(vec!["https://r2.example/a.jpg".to_string()]);
        assert_eq!(serde_json::to_value(&array).unwrap(), json!(["https://r2.example/a.jpg"]));

        let back: StringArray = serde_json::from_value(json!(["x", ""])).unwrap();
        assert_eq!(back.as_slice(), ["x", ""]);

        let null: StringArray = serde_json::from_value(Value::Null).unwrap();
        assert!(null.is_empty());
    }
}
