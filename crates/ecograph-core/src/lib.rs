//! ecograph-core: Shared types, schema registry, configuration, and error
//! handling for ecograph.
//!
//! This crate provides the foundational pieces used across ecograph:
//! - Entity type descriptors mapping catalog entities to RDF classes
//! - Submission, identifier, and statement types
//! - Configuration management
//! - Common error types

pub mod config;
pub mod error;
pub mod registry;
pub mod types;

pub use config::{EcoGraphConfig, OntologyConfig, StoreConfig};
pub use error::{EcoGraphError, Result};
pub use registry::{EntityKind, Registry};
pub use types::{
    Collection, EntityTypeDescriptor, FieldDescriptor, GraphIdentifier, Row, SubmittedRecord,
    UpdateStatement,
};
