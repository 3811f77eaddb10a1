//! Configuration management for ecograph.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (ECOGRAPH_ prefix, `__` separator)
//! 2. Config file (ecograph.toml)
//! 3. Defaults

use serde::Deserialize;

use crate::error::Result;

/// Prefix label the registry's class and predicate names are written in.
pub const DOMAIN_PREFIX: &str = "eco";

/// Standard RDF namespace IRI.
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// Standard RDFS namespace IRI.
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EcoGraphConfig {
    #[serde(default)]
    pub ontology: OntologyConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

/// Domain namespace used for subjects, classes, and `eco:` predicates.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OntologyConfig {
    /// Namespace IRI the `eco:` prefix expands to.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl OntologyConfig {
    /// The fixed set of prefix declarations every statement carries:
    /// the domain prefix, then `rdf:` and `rdfs:`.
    pub fn prefixes(&self) -> [(&str, &str); 3] {
        [
            (DOMAIN_PREFIX, self.namespace.as_str()),
            ("rdf", RDF_NS),
            ("rdfs", RDFS_NS),
        ]
    }

    /// Render the prefix declarations as a statement header, one per line.
    pub fn prefix_header(&self) -> String {
        self.prefixes()
            .iter()
            .map(|(label, iri)| format!("PREFIX {label}: <{iri}>\n"))
            .collect()
    }

    /// Prefixed name for a local name in the domain namespace.
    pub fn qualify(&self, local_name: &str) -> String {
        format!("{DOMAIN_PREFIX}:{local_name}")
    }
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
        }
    }
}

/// Connection settings for the SPARQL store.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// SPARQL query endpoint.
    #[serde(default = "default_query_endpoint")]
    pub query_endpoint: String,

    /// SPARQL update endpoint. Derived from `query_endpoint` when unset.
    #[serde(default)]
    pub update_endpoint: Option<String>,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl StoreConfig {
    /// The update endpoint, falling back to the query endpoint with a
    /// trailing `/sparql` replaced by `/update`.
    pub fn resolved_update_endpoint(&self) -> String {
        if let Some(endpoint) = &self.update_endpoint {
            return endpoint.clone();
        }
        match self.query_endpoint.strip_suffix("/sparql") {
            Some(base) => format!("{base}/update"),
            None => self.query_endpoint.clone(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            query_endpoint: default_query_endpoint(),
            update_endpoint: None,
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

fn default_namespace() -> String {
    "http://www.semanticweb.org/achref/ontologies/2025/9/tourism-eco#".to_string()
}

fn default_query_endpoint() -> String {
    "http://localhost:3030/tourisme-eco-2/sparql".to_string()
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

/// Load configuration from `<file_prefix>.toml` (optional) and
/// `ECOGRAPH__*` environment variables.
pub fn load(file_prefix: &str) -> Result<EcoGraphConfig> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("ECOGRAPH")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let loaded: EcoGraphConfig = cfg.try_deserialize()?;
    tracing::debug!(
        namespace = %loaded.ontology.namespace,
        query_endpoint = %loaded.store.query_endpoint,
        "Configuration loaded"
    );
    Ok(loaded)
}
