//! Write operations: record creation.
//!
//! Each submission mints a fresh subject, so a failed write is never
//! retried here; retrying would create a second record.

use ecograph_core::{EcoGraphError, GraphIdentifier, Result, SubmittedRecord, UpdateStatement};

use crate::assemble::validate;
use crate::client::SparqlExecutor;
use crate::mint::Clock;
use crate::service::RecordService;

impl<E: SparqlExecutor, C: Clock> RecordService<E, C> {
    /// Validate and assemble a record without sending it.
    pub fn preview(&self, record: &SubmittedRecord) -> Result<UpdateStatement> {
        validate(self.assembler().registry(), record)?;
        self.assembler().assemble_record(record)
    }

    /// Validate, assemble, and execute a record as one INSERT DATA.
    ///
    /// Returns the minted identifier of the new node.
    pub async fn create(&self, record: &SubmittedRecord) -> Result<GraphIdentifier> {
        let statement = self.preview(record)?;

        if let Err(e) = self.executor().execute_update(&statement.text).await {
            tracing::warn!(
                entity_type = %record.entity_type_key,
                subject = %statement.subject,
                error = %e,
                "Insert rejected"
            );
            return Err(EcoGraphError::from(e));
        }

        tracing::info!(
            entity_type = %record.entity_type_key,
            subject = %statement.subject,
            "Record created"
        );
        Ok(statement.subject)
    }
}
