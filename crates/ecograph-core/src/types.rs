//! Core domain types shared by the write path and the read path.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── Schema ────────────────────────────────────────────────────────

/// One catalog entity type: its graph class and field layout.
///
/// The `fields` order is both the form order and the order in which
/// populated fields are serialized.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EntityTypeDescriptor {
    /// Registry key, e.g. `"activites"`.
    pub key: &'static str,
    /// Prefixed class name, e.g. `"eco:ActiviteTouristique"`.
    pub class_uri: &'static str,
    pub fields: &'static [FieldDescriptor],
    /// Predicate used for fields without an explicit mapping.
    pub fallback_predicate: &'static str,
    /// Field names shown as table columns, in column order.
    pub display_fields: &'static [&'static str],
    pub display: DisplayMetadata,
}

impl EntityTypeDescriptor {
    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Predicate for a field name: its explicit mapping, or the fallback
    /// for anything unmapped or undeclared.
    pub fn predicate_for(&self, name: &str) -> &'static str {
        self.field(name)
            .and_then(|f| f.predicate_uri)
            .unwrap_or(self.fallback_predicate)
    }

    /// Declared fields flagged as required.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Descriptors of the display columns, in column order.
    pub fn display_columns(&self) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.display_fields.iter().filter_map(|name| self.field(name))
    }
}

/// A single field of an entity type.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    /// Prefixed predicate name. `None` means the entity type's fallback.
    pub predicate_uri: Option<&'static str>,
    pub label: &'static str,
    pub required: bool,
}

/// Human-facing metadata for an entity type.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DisplayMetadata {
    pub title: &'static str,
    pub single_name: &'static str,
    pub description: &'static str,
}

// ── Submissions ───────────────────────────────────────────────────

/// A user submission: field values for one entity type.
///
/// Empty values are treated as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmittedRecord {
    pub entity_type_key: String,
    pub values: BTreeMap<String, String>,
}

impl SubmittedRecord {
    pub fn new(entity_type_key: impl Into<String>) -> Self {
        Self {
            entity_type_key: entity_type_key.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// The value for `name` if present and non-empty.
    pub fn populated(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Local name of a freshly minted graph node, e.g. `certifications_1000`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphIdentifier {
    pub local_name: String,
}

impl GraphIdentifier {
    pub fn new(entity_type_key: &str, token: u64) -> Self {
        Self {
            local_name: format!("{entity_type_key}_{token}"),
        }
    }
}

impl fmt::Display for GraphIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.local_name)
    }
}

/// A complete INSERT DATA statement plus the subject it creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatement {
    pub subject: GraphIdentifier,
    /// The subject block alone, from subject to final `.`.
    pub triples: String,
    /// Full statement text: prefix declarations and INSERT DATA envelope.
    pub text: String,
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ── Read results ──────────────────────────────────────────────────

/// One result row: variable name → lexical value.
pub type Row = BTreeMap<String, String>;

/// Rows read back for one entity type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Collection {
    pub entity_type: String,
    pub rows: Vec<Row>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_format() {
        let id = GraphIdentifier::new("certifications", 1000);
        assert_eq!(id.local_name, "certifications_1000");
        assert_eq!(id.to_string(), "certifications_1000");
    }

    #[test]
    fn populated_skips_empty_values() {
        let record = SubmittedRecord::new("activites")
            .with("nom", "Kayak")
            .with("duree", "");
        assert_eq!(record.populated("nom"), Some("Kayak"));
        assert_eq!(record.populated("duree"), None);
        assert_eq!(record.populated("prix"), None);
    }

    #[test]
    fn record_json_roundtrip() {
        let record = SubmittedRecord::new("hebergements").with("nom", "Dar Bhar");
        let json = serde_json::to_string(&record).unwrap();
        let back: SubmittedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
