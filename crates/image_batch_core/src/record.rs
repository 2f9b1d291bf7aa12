//! Flat records produced by the processor and consumed by the exporter.

use std::collections::BTreeSet;
use std::fmt;

/// Name of the field every record carries.
pub const FILENAME_FIELD: &str = "filename";

/// A single extracted value. Always rendered as text on export.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// Field name to value mapping that keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedRecord {
    fields: Vec<(String, FieldValue)>,
}

impl ProcessedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a record with the `filename` field set.
    pub fn with_filename(filename: impl Into<String>) -> Self {
        let mut record = Self::new();
        record.insert(FILENAME_FIELD, filename.into());
        record
    }

    /// Sets `name` to `value`. An existing field keeps its position and the
    /// previous value is returned.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn filename(&self) -> Option<&str> {
        match self.get(FILENAME_FIELD) {
            Some(FieldValue::Text(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when both records carry the same set of field names, in any order.
    pub fn has_same_fields(&self, other: &ProcessedRecord) -> bool {
        let mine: BTreeSet<&str> = self.field_names().collect();
        let theirs: BTreeSet<&str> = other.field_names().collect();
        mine == theirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_order_and_replaces_in_place() {
        let mut rec = ProcessedRecord::with_filename("a.png");
        rec.insert("width", 1920u32);
        rec.insert("label", "cat");
        let old = rec.insert("width", 640u32);

        assert_eq!(old, Some(FieldValue::Integer(1920)));
        assert_eq!(
            rec.field_names().collect::<Vec<_>>(),
            vec!["filename", "width", "label"]
        );
        assert_eq!(rec.get("width"), Some(&FieldValue::Integer(640)));
        assert_eq!(rec.filename(), Some("a.png"));
    }

    #[test]
    fn same_fields_ignores_order() {
        let mut a = ProcessedRecord::with_filename("a.png");
        a.insert("x", 1i64);
        let mut b = ProcessedRecord::new();
        b.insert("x", 2i64);
        b.insert("filename", "b.png");
        assert!(a.has_same_fields(&b));

        b.insert("y", true);
        assert!(!a.has_same_fields(&b));
    }

    #[test]
    fn values_render_as_text() {
        assert_eq!(FieldValue::from(0.95).to_string(), "0.95");
        assert_eq!(FieldValue::from(1080u32).to_string(), "1080");
        assert_eq!(FieldValue::from(false).to_string(), "false");
        assert_eq!(FieldValue::from("person, car").to_string(), "person, car");
    }
}
