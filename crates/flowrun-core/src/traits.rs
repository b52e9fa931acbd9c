// Core traits for pluggable store backends
//
// These traits allow the engine to be used with different backends:
// - In-memory implementations for the server and for testing
// - Persistent implementations later, without touching transition logic

use async_trait::async_trait;

use crate::error::Result;
use crate::workflow::{WorkflowDef, WorkflowInst};

// ============================================================================
// DefinitionStore - Validated workflow definitions keyed by id
// ============================================================================

/// Trait for storing accepted workflow definitions
///
/// Definitions are immutable once stored: there is no update or delete.
#[async_trait]
pub trait DefinitionStore: Send + Sync {
    /// Insert a definition if its id is free.
    ///
    /// Returns `false` without modifying the store when the id is taken.
    async fn insert(&self, def: WorkflowDef) -> Result<bool>;

    /// Get a definition by id
    async fn get(&self, id: &str) -> Result<Option<WorkflowDef>>;

    /// Snapshot of all stored definitions
    async fn list(&self) -> Result<Vec<WorkflowDef>>;

    /// Snapshot of all stored definition ids
    async fn ids(&self) -> Result<Vec<String>> {
        Ok(self.list().await?.into_iter().map(|d| d.id).collect())
    }
}

// ============================================================================
// InstanceStore - Running workflow instances keyed by id
// ============================================================================

/// Derives the next value of a stored instance from its current value.
///
/// Returning an error aborts the update and leaves the stored instance as is.
pub type InstanceUpdate = Box<dyn FnOnce(&WorkflowInst) -> Result<WorkflowInst> + Send>;

/// Trait for storing workflow instances
#[async_trait]
pub trait InstanceStore: Send + Sync {
    /// Insert a new instance, replacing any instance with the same id
    async fn insert(&self, inst: WorkflowInst) -> Result<()>;

    /// Get an instance by id
    async fn get(&self, id: &str) -> Result<Option<WorkflowInst>>;

    /// Snapshot of all stored instances
    async fn list(&self) -> Result<Vec<WorkflowInst>>;

    /// Atomically replace the instance `id` with `apply(current)`.
    ///
    /// Updates to the same id are serialized. Returns `Ok(None)` if the id is
    /// unknown, and propagates any error from `apply` without writing.
    async fn update(&self, id: &str, apply: InstanceUpdate) -> Result<Option<WorkflowInst>>;
}
