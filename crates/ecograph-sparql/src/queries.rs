//! Read operations: collection SELECT builder and result parsing.

use std::collections::BTreeMap;

use serde::Deserialize;

use ecograph_core::{Collection, EntityTypeDescriptor, OntologyConfig, Result, Row};

use crate::client::{SparqlExecutor, StoreError};
use crate::mint::Clock;
use crate::service::RecordService;

/// Variable bound to the subject of each listed entity.
pub const ITEM_VAR: &str = "item";

/// SELECT listing every instance of the entity type with its display
/// columns. Each column is OPTIONAL so sparse records still appear.
pub fn select_query(
    descriptor: &EntityTypeDescriptor,
    ontology: &OntologyConfig,
    limit: Option<usize>,
) -> String {
    let columns = descriptor.display_fields;

    let mut projection = format!("?{ITEM_VAR}");
    for name in columns {
        projection.push_str(" ?");
        projection.push_str(name);
    }

    let mut patterns = format!("  ?{ITEM_VAR} rdf:type {} .\n", descriptor.class_uri);
    for name in columns {
        patterns.push_str(&format!(
            "  OPTIONAL {{ ?{ITEM_VAR} {} ?{name} }}\n",
            descriptor.predicate_for(name)
        ));
    }

    let mut query = format!(
        "{}\nSELECT {projection} WHERE {{\n{patterns}}}\nORDER BY ?{ITEM_VAR}",
        ontology.prefix_header()
    );
    if let Some(n) = limit {
        query.push_str(&format!("\nLIMIT {n}"));
    }
    query
}

// ── SPARQL JSON results ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SparqlResults {
    #[serde(default)]
    results: ResultSet,
}

#[derive(Debug, Default, Deserialize)]
struct ResultSet {
    #[serde(default)]
    bindings: Vec<BTreeMap<String, serde_json::Value>>,
}

/// Parse an `application/sparql-results+json` body into rows of
/// variable → lexical value. Bindings without a `value` are skipped.
pub fn parse_results(body: &str) -> std::result::Result<Vec<Row>, StoreError> {
    let parsed: SparqlResults =
        serde_json::from_str(body).map_err(|e| StoreError::Results(e.to_string()))?;

    Ok(parsed
        .results
        .bindings
        .into_iter()
        .map(|binding| {
            binding
                .into_iter()
                .filter_map(|(var, term)| {
                    let value = term.get("value")?.as_str()?.to_string();
                    Some((var, value))
                })
                .collect()
        })
        .collect())
}

/// Keep only the subject and display columns of a row.
pub fn project_row(descriptor: &EntityTypeDescriptor, mut row: Row) -> Row {
    row.retain(|key, _| {
        key == ITEM_VAR || descriptor.display_fields.iter().any(|f| *f == key.as_str())
    });
    row
}

impl<E: SparqlExecutor, C: Clock> RecordService<E, C> {
    /// Read the stored instances of an entity type.
    pub async fn list(&self, entity_type_key: &str, limit: Option<usize>) -> Result<Collection> {
        let descriptor = self.assembler().registry().get(entity_type_key)?;
        let query = select_query(descriptor, self.assembler().ontology(), limit);

        let rows = self.executor().execute_query(&query).await?;
        let rows: Vec<Row> = rows
            .into_iter()
            .map(|row| project_row(descriptor, row))
            .collect();

        tracing::info!(entity_type = descriptor.key, rows = rows.len(), "Collection read");
        Ok(Collection {
            entity_type: descriptor.key.to_string(),
            rows,
        })
    }
}
