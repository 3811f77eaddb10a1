//! INSERT DATA statement assembly.
//!
//! A statement is one subject block: the type triple, then one triple per
//! populated field in registry order, then any undeclared fields sorted by
//! name. Punctuation depends only on a triple's position in that block.

use std::collections::BTreeMap;

use ecograph_core::{
    EcoGraphError, EntityTypeDescriptor, OntologyConfig, Registry, Result, SubmittedRecord,
    UpdateStatement,
};

use crate::encode::encode_triple;
use crate::mint::{Clock, Minter, SystemClock};

/// Terminator for the triple at `position` of `total`.
fn terminator(position: usize, total: usize) -> char {
    if position + 1 == total {
        '.'
    } else {
        ';'
    }
}

/// Join predicate/object fragments into one subject block.
///
/// `fragments` must be non-empty; the first is attached to `subject`.
fn subject_block(subject: &str, fragments: &[String]) -> String {
    let total = fragments.len();
    let mut block = String::from(subject);
    for (position, fragment) in fragments.iter().enumerate() {
        block.push(' ');
        block.push_str(fragment);
        block.push(' ');
        block.push(terminator(position, total));
    }
    block
}

/// Populated `(field, value)` pairs in serialization order.
fn ordered_fields<'a>(
    descriptor: &EntityTypeDescriptor,
    values: &'a BTreeMap<String, String>,
) -> Vec<(&'a str, &'a str)> {
    let populated = |name: &str| {
        values
            .get_key_value(name)
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    };

    let declared = descriptor.fields.iter().filter_map(|f| populated(f.name));
    let undeclared = values
        .iter()
        .filter(|(k, v)| !v.is_empty() && descriptor.field(k).is_none())
        .map(|(k, v)| (k.as_str(), v.as_str()));

    declared.chain(undeclared).collect()
}

/// Check that every required field of the record's entity type is
/// populated.
pub fn validate(registry: &Registry, record: &SubmittedRecord) -> Result<()> {
    let descriptor = registry.get(&record.entity_type_key)?;
    match descriptor
        .required_fields()
        .find(|f| record.populated(f.name).is_none())
    {
        Some(missing) => Err(EcoGraphError::MissingRequiredField {
            entity_type: descriptor.key.to_string(),
            field: missing.name.to_string(),
        }),
        None => Ok(()),
    }
}

/// Builds update statements against one registry and namespace.
#[derive(Debug)]
pub struct Assembler<C = SystemClock> {
    registry: Registry,
    ontology: OntologyConfig,
    minter: Minter<C>,
}

impl Assembler<SystemClock> {
    pub fn new(registry: Registry, ontology: OntologyConfig) -> Self {
        Self::with_minter(registry, ontology, Minter::system())
    }
}

impl<C: Clock> Assembler<C> {
    pub fn with_minter(registry: Registry, ontology: OntologyConfig, minter: Minter<C>) -> Self {
        Self {
            registry,
            ontology,
            minter,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn ontology(&self) -> &OntologyConfig {
        &self.ontology
    }

    /// Assemble an INSERT DATA statement for one new entity.
    ///
    /// Empty values are skipped. Required fields are not checked here;
    /// see [`validate`]. Fails before producing any text if the entity
    /// type is unknown or a value cannot be encoded.
    pub fn assemble(
        &self,
        entity_type_key: &str,
        values: &BTreeMap<String, String>,
    ) -> Result<UpdateStatement> {
        let descriptor = self.registry.get(entity_type_key)?;

        let fields = ordered_fields(descriptor, values);
        let mut fragments = Vec::with_capacity(fields.len() + 1);
        fragments.push(format!("rdf:type {}", descriptor.class_uri));
        for (name, value) in &fields {
            let fragment = encode_triple(descriptor.predicate_for(name), value).map_err(|e| {
                EcoGraphError::UnsafeLiteralValue {
                    field: (*name).to_string(),
                    character: e.character,
                    offset: e.offset,
                }
            })?;
            fragments.push(fragment);
        }

        let subject = self.minter.mint(descriptor.key);
        let triples = subject_block(&self.ontology.qualify(&subject.local_name), &fragments);
        let text = format!(
            "{}\nINSERT DATA {{\n  {triples}\n}}",
            self.ontology.prefix_header()
        );

        tracing::debug!(
            entity_type = descriptor.key,
            subject = %subject,
            field_count = fields.len(),
            "Assembled insert statement"
        );

        Ok(UpdateStatement {
            subject,
            triples,
            text,
        })
    }

    /// Assemble a submitted record.
    pub fn assemble_record(&self, record: &SubmittedRecord) -> Result<UpdateStatement> {
        self.assemble(&record.entity_type_key, &record.values)
    }
}
