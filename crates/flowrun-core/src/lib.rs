// Workflow Engine Abstraction
//
// This crate provides a storage-agnostic implementation of finite-state-machine
// workflows: clients declare definitions (states + actions) and run independent
// instances of them, advancing each instance one action at a time.
//
// Key design decisions:
// - Definitions are validated once by an ordered list of guard clauses; the first
//   failing check determines the rejection
// - Stores are traits (DefinitionStore, InstanceStore) injected into the engine
// - Instance updates derive a new value from the old one and swap it in under a
//   per-instance lock, so history appends are never lost
// - Domain entity types carry optional OpenAPI schemas behind the `openapi` feature

// Domain entity types
pub mod workflow;

pub mod engine;
pub mod error;
pub mod traits;
pub mod validation;

// In-memory implementations for the server and for testing
pub mod memory;

// Re-exports for convenience
pub use engine::WorkflowEngine;
pub use error::{DefinitionError, Result, WorkflowError};
pub use memory::{InMemoryDefinitionStore, InMemoryInstanceStore};
pub use traits::{DefinitionStore, InstanceStore, InstanceUpdate};
pub use validation::validate;
pub use workflow::{ActionDef, HistoryEntry, State, WorkflowDef, WorkflowInst};
