//! One inbound message: a table name plus a map of typed fields.

use crate::domain::identifier::Identifier;
use crate::domain::value::{infer, FieldValue};
use crate::error::DecodeError;
use serde::Deserialize;
use serde_json::value::RawValue;
use std::collections::HashMap;

/// Wire shape: `{"table": "...", "data": {"name": <scalar>, ...}}`.
///
/// Data values are kept as raw JSON text so inference sees the literal
/// exactly as the producer wrote it (`1` and `1.0` must stay distinct).
#[derive(Deserialize)]
struct WireRecord {
    #[serde(default)]
    table: String,
    #[serde(default)]
    data: HashMap<String, Box<RawValue>>,
}

/// A table identifier and its fields. Immutable once built.
#[derive(Debug, Clone)]
pub struct Record {
    table: Identifier,
    fields: HashMap<Identifier, FieldValue>,
}

impl Record {
    pub fn new<I, K>(table: impl Into<Identifier>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldValue)>,
        K: Into<Identifier>,
    {
        Self {
            table: table.into(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Decodes one wire message, inferring every field's type.
    ///
    /// Fails on malformed JSON or on the first field whose literal cannot be
    /// classified. Identifier grammar is not checked here; see
    /// [`Record::is_valid`].
    pub fn from_json(body: &[u8]) -> Result<Self, DecodeError> {
        let wire: WireRecord = serde_json::from_slice(body)?;

        let mut fields = HashMap::with_capacity(wire.data.len());
        for (name, raw) in wire.data {
            let value = infer(raw.get()).map_err(|source| DecodeError::Field {
                field: name.clone(),
                source,
            })?;
            fields.insert(Identifier::new(name), value);
        }

        Ok(Self {
            table: Identifier::new(wire.table),
            fields,
        })
    }

    pub fn table(&self) -> &Identifier {
        &self.table
    }

    pub fn fields(&self) -> &HashMap<Identifier, FieldValue> {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(&Identifier::from(name))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in lexicographic order.
    pub fn columns(&self) -> Vec<&Identifier> {
        let mut names: Vec<&Identifier> = self.fields.keys().collect();
        names.sort();
        names
    }

    /// Table and every field name follow the identifier grammar, and every
    /// value was classified.
    pub fn is_valid(&self) -> bool {
        self.table.is_valid()
            && self
                .fields
                .iter()
                .all(|(name, value)| name.is_valid() && value.is_classified())
    }

    /// Same table and the same set of field names. Values are not compared.
    pub fn same_shape(&self, other: &Record) -> bool {
        self.table == other.table
            && self.fields.len() == other.fields.len()
            && self.fields.keys().all(|k| other.fields.contains_key(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value::FieldKind;
    use crate::error::FormatError;

    #[test]
    fn decodes_every_scalar_kind() {
        let body = br#"{"table": "table", "data": {"float": 1.0, "string": "str", "int": 1, "bool": false, "null":null}}"#;
        let record = Record::from_json(body).unwrap();

        assert!(record.is_valid());
        assert_eq!(record.table().as_str(), "table");
        assert_eq!(record.get("float"), Some(&FieldValue::Float(1.0)));
        assert_eq!(record.get("string"), Some(&FieldValue::String("str".into())));
        assert_eq!(record.get("int"), Some(&FieldValue::Int(1)));
        assert_eq!(record.get("bool"), Some(&FieldValue::Bool(false)));
        assert_eq!(record.get("null"), Some(&FieldValue::Null));
    }

    #[test]
    fn empty_string_is_a_string() {
        let record = Record::from_json(br#"{"table": "stable", "data": {"string": ""}}"#).unwrap();
        assert_eq!(record.get("string").map(FieldValue::kind), Some(FieldKind::String));
    }

    #[test]
    fn nested_values_are_rejected() {
        for body in [
            br#"{"table": "bad", "data": {"array": [1,2,3]}}"#.as_slice(),
            br#"{"table": "bad", "data": {"obj": {}}}"#.as_slice(),
        ] {
            match Record::from_json(body) {
                Err(DecodeError::Field { source: FormatError { .. }, .. }) => {}
                other => panic!("expected a format error, got {other:?}"),
            }
        }
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(matches!(Record::from_json(b"{not json}"), Err(DecodeError::Json(_))));
        assert!(matches!(Record::from_json(b""), Err(DecodeError::Json(_))));
    }

    #[test]
    fn validity_follows_identifiers_and_values() {
        assert!(Record::new("t", [("a", FieldValue::Int(1))]).is_valid());
        assert!(Record::new("t", Vec::<(&str, FieldValue)>::new()).is_valid());
        assert!(!Record::new("bad table", [("a", FieldValue::Int(1))]).is_valid());
        assert!(!Record::new("t", [("a_b", FieldValue::Int(1))]).is_valid());
        assert!(!Record::new("t", [("a", FieldValue::Invalid)]).is_valid());

        let decoded = Record::from_json(br#"{"table": "t", "data": {"two words": 1}}"#).unwrap();
        assert!(!decoded.is_valid());
    }

    #[test]
    fn same_shape_ignores_values() {
        let a = Record::new("t", [("x", FieldValue::Int(1)), ("y", FieldValue::Null)]);
        let b = Record::new("t", [("y", FieldValue::Bool(true)), ("x", FieldValue::Float(9.5))]);
        assert!(a.same_shape(&b));
        assert!(b.same_shape(&a));

        let other_table = Record::new("u", [("x", FieldValue::Int(1)), ("y", FieldValue::Null)]);
        assert!(!a.same_shape(&other_table));

        let fewer = Record::new("t", [("x", FieldValue::Int(1))]);
        assert!(!a.same_shape(&fewer));
        assert!(!fewer.same_shape(&a));
    }

    #[test]
    fn columns_are_sorted() {
        let record = Record::new(
            "t",
            [("zeta", FieldValue::Null), ("alpha", FieldValue::Null), ("mid", FieldValue::Null)],
        );
        let names: Vec<&str> = record.columns().into_iter().map(Identifier::as_str).collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }
}
