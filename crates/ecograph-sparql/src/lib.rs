//! ecograph-sparql: SPARQL assembly and store access for the catalog.
//!
//! This crate is the single write path into the graph store. Every
//! submitted record is validated against the schema registry, given a
//! freshly minted subject, and serialized into one INSERT DATA statement
//! with escaped literals before it reaches the store.

pub mod assemble;
pub mod client;
pub mod encode;
pub mod mint;
pub mod mutations;
pub mod queries;
pub mod service;

pub use assemble::{validate, Assembler};
pub use client::{SparqlExecutor, StoreClient, StoreError};
pub use mint::{Clock, FixedClock, Minter, SystemClock};
pub use service::RecordService;
