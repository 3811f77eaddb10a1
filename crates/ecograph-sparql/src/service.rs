//! The record service: registry, assembler, and executor wired together.
//!
//! Writes live in [`crate::mutations`], reads in [`crate::queries`].

use ecograph_core::{OntologyConfig, Registry};

use crate::assemble::Assembler;
use crate::mint::{Clock, Minter, SystemClock};

/// Front door for creating and listing catalog records.
///
/// Holds one [`Minter`] so every submission through the same service
/// gets a distinct subject.
#[derive(Debug)]
pub struct RecordService<E, C = SystemClock> {
    assembler: Assembler<C>,
    executor: E,
}

impl<E> RecordService<E, SystemClock> {
    pub fn new(executor: E, ontology: OntologyConfig) -> Self {
        Self::with_assembler(executor, Assembler::new(Registry::builtin(), ontology))
    }
}

impl<E, C: Clock> RecordService<E, C> {
    pub fn with_assembler(executor: E, assembler: Assembler<C>) -> Self {
        Self {
            assembler,
            executor,
        }
    }

    /// Service with an injected clock.
    pub fn with_clock(executor: E, ontology: OntologyConfig, clock: C) -> Self {
        Self::with_assembler(
            executor,
            Assembler::with_minter(Registry::builtin(), ontology, Minter::new(clock)),
        )
    }

    pub fn assembler(&self) -> &Assembler<C> {
        &self.assembler
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }
}
