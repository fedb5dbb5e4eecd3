//! Domain types for the linedex aggregate.
//!
//! Field values keep their original JSON types end to end; only `line_code`
//! has a shape constraint (non-empty string) because it drives sorting,
//! duplicate detection, and output file naming.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RecordError;
use crate::schema::{self, SchemaVersion};

// ---------------------------------------------------------------------------
// LineCode
// ---------------------------------------------------------------------------

/// A strongly-typed record identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineCode(pub String);

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for LineCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LineCode {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Whether `code` can serve as a sort key and output file name.
fn is_usable_code(code: &str) -> bool {
    !code.is_empty() && !code.contains(['/', '\\'])
}

// ---------------------------------------------------------------------------
// IndexEntry
// ---------------------------------------------------------------------------

/// One aggregate entry: a source record projected onto the schema's
/// canonical field set, everything else dropped.
///
/// Serializes as a plain JSON object. Entries built via [`IndexEntry::project`]
/// are guaranteed a usable identifier; entries deserialized from an existing
/// artifact are not (the emitter re-checks per entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexEntry {
    fields: Map<String, Value>,
}

impl IndexEntry {
    /// Validate `record` against `schema` and keep exactly the schema's
    /// fields (required set, plus optional fields where present).
    pub fn project(record: &Map<String, Value>, schema: SchemaVersion) -> Result<Self, RecordError> {
        for field in schema.required_fields() {
            if !record.contains_key(*field) {
                return Err(RecordError::MissingField { field });
            }
        }
        match record.get(schema::LINE_CODE) {
            Some(Value::String(code)) if is_usable_code(code) => {}
            _ => return Err(RecordError::InvalidLineCode),
        }

        let mut fields = Map::new();
        for field in schema
            .required_fields()
            .iter()
            .chain(schema.optional_fields())
        {
            if let Some(value) = record.get(*field) {
                fields.insert((*field).to_owned(), value.clone());
            }
        }
        Ok(Self { fields })
    }

    /// The identifier, if usable: present, a non-empty string, and free of
    /// path separators (it becomes an output file name).
    pub fn line_code(&self) -> Option<&str> {
        match self.fields.get(schema::LINE_CODE) {
            Some(Value::String(code)) if is_usable_code(code) => Some(code),
            _ => None,
        }
    }

    /// Raw field access (used for tabular display).
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// The ordered collection of all projected entries.
///
/// Invariant after [`Aggregate::sort_by_line_code`]: non-decreasing by
/// identifier, lexicographic. Serializes as a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aggregate {
    entries: Vec<IndexEntry>,
}

impl Aggregate {
    pub fn push(&mut self, entry: IndexEntry) {
        self.entries.push(entry);
    }

    /// Ascending lexicographic sort by identifier. Entries without one
    /// (possible only in hand-edited artifacts) sort first.
    pub fn sort_by_line_code(&mut self) {
        self.entries
            .sort_by(|a, b| a.line_code().cmp(&b.line_code()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndexEntry> {
        self.entries.iter()
    }

    /// Canonical artifact encoding: 2-space indent, non-ASCII unescaped,
    /// trailing newline.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl<'a> IntoIterator for &'a Aggregate {
    type Item = &'a IndexEntry;
    type IntoIter = std::slice::Iter<'a, IndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record_v2(code: &str) -> Map<String, Value> {
        let value = json!({
            "line_code": code,
            "line_name": "Yamanote Line",
            "destination": "Loop service",
            "company_code": "JE",
            "company": "JR East",
            "service_type": "local",
            "service": "all stations",
            "line_color_1": "#9ACD32",
            "service_color": "#80C241",
            "builder": "JNR",
        });
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn line_code_display_and_order() {
        assert_eq!(LineCode::from("JY").to_string(), "JY");
        assert!(LineCode::from("A1") < LineCode::from("A2"));
    }

    #[test]
    fn project_keeps_only_schema_fields() {
        let mut record = record_v2("JY");
        record.insert("stations".into(), json!(["Tokyo", "Kanda"]));
        let entry = IndexEntry::project(&record, SchemaVersion::V2).expect("project");
        assert_eq!(entry.line_code(), Some("JY"));
        assert!(entry.get("stations").is_none(), "extra fields must be dropped");
        assert_eq!(entry.get("company"), Some(&json!("JR East")));
    }

    #[test]
    fn project_rejects_missing_required_field() {
        let mut record = record_v2("JY");
        record.remove("company");
        let err = IndexEntry::project(&record, SchemaVersion::V2).unwrap_err();
        assert_eq!(err, RecordError::MissingField { field: "company" });
    }

    #[test]
    fn project_rejects_empty_line_code() {
        let record = record_v2("");
        let err = IndexEntry::project(&record, SchemaVersion::V2).unwrap_err();
        assert_eq!(err, RecordError::InvalidLineCode);
    }

    #[test]
    fn project_rejects_line_code_with_path_separator() {
        let record = record_v2("../escape");
        let err = IndexEntry::project(&record, SchemaVersion::V2).unwrap_err();
        assert_eq!(err, RecordError::InvalidLineCode);
    }

    #[test]
    fn project_rejects_non_string_line_code() {
        let mut record = record_v2("JY");
        record.insert("line_code".into(), json!(14));
        let err = IndexEntry::project(&record, SchemaVersion::V2).unwrap_err();
        assert_eq!(err, RecordError::InvalidLineCode);
    }

    #[test]
    fn project_carries_optional_train_when_present() {
        let mut record = record_v2("JY");
        record.insert("train".into(), json!("E235 series"));
        let entry = IndexEntry::project(&record, SchemaVersion::V2).expect("project");
        assert_eq!(entry.get("train"), Some(&json!("E235 series")));

        let without = IndexEntry::project(&record_v2("JY"), SchemaVersion::V2).expect("project");
        assert!(without.get("train").is_none());
    }

    #[test]
    fn v1_requires_color_not_line_color_1() {
        let mut record = record_v2("JY");
        let err = IndexEntry::project(&record, SchemaVersion::V1).unwrap_err();
        assert_eq!(err, RecordError::MissingField { field: "color" });

        record.insert("color".into(), json!("#9ACD32"));
        IndexEntry::project(&record, SchemaVersion::V1).expect("v1 project");
    }

    #[test]
    fn aggregate_sorts_lexicographically() {
        let mut agg = Aggregate::default();
        for code in ["JY", "A2", "A1"] {
            agg.push(IndexEntry::project(&record_v2(code), SchemaVersion::V2).expect("project"));
        }
        agg.sort_by_line_code();
        let codes: Vec<_> = agg.iter().filter_map(|e| e.line_code()).collect();
        assert_eq!(codes, vec!["A1", "A2", "JY"]);
    }

    #[test]
    fn aggregate_json_roundtrip_preserves_non_ascii() {
        let mut record = record_v2("G");
        record.insert("line_name".into(), json!("銀座線"));
        let mut agg = Aggregate::default();
        agg.push(IndexEntry::project(&record, SchemaVersion::V2).expect("project"));

        let text = agg.to_json().expect("encode");
        assert!(text.contains("銀座線"), "non-ASCII must stay unescaped");
        assert!(text.ends_with('\n'));

        let back = Aggregate::from_json(&text).expect("decode");
        assert_eq!(back, agg);
    }

    #[test]
    fn empty_aggregate_encodes_as_empty_array() {
        let agg = Aggregate::default();
        assert_eq!(agg.to_json().expect("encode"), "[]\n");
        assert!(agg.is_empty());
    }
}
