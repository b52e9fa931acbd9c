// Workflow engine
//
// Owns the two stores and implements every operation the API exposes:
// definition submission/lookup and instance creation/lookup/action execution.
// Errors are returned to the caller as-is, never retried or logged here.

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{DefinitionError, Result, WorkflowError};
use crate::memory::{InMemoryDefinitionStore, InMemoryInstanceStore};
use crate::traits::{DefinitionStore, InstanceStore};
use crate::validation::validate;
use crate::workflow::{WorkflowDef, WorkflowInst};

/// Definition validator and instance transition engine
#[derive(Clone)]
pub struct WorkflowEngine {
    definitions: Arc<dyn DefinitionStore>,
    instances: Arc<dyn InstanceStore>,
}

impl WorkflowEngine {
    pub fn new(definitions: Arc<dyn DefinitionStore>, instances: Arc<dyn InstanceStore>) -> Self {
        Self {
            definitions,
            instances,
        }
    }

    /// Engine backed by fresh in-memory stores
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryDefinitionStore::new()),
            Arc::new(InMemoryInstanceStore::new()),
        )
    }

    // ------------------------------------------------------------------------
    // Definitions
    // ------------------------------------------------------------------------

    /// Validate and store a new definition
    pub async fn submit_definition(&self, def: WorkflowDef) -> Result<WorkflowDef> {
        let existing: HashSet<String> = self.definitions.ids().await?.into_iter().collect();
        validate(&def, &existing)?;

        // A concurrent submit may have claimed the id since the snapshot above
        if !self.definitions.insert(def.clone()).await? {
            return Err(DefinitionError::DuplicateDefinition(def.id).into());
        }

        tracing::debug!(
            definition_id = %def.id,
            states = def.states.len(),
            actions = def.actions.len(),
            "Definition stored"
        );
        Ok(def)
    }

    pub async fn list_definitions(&self) -> Result<Vec<WorkflowDef>> {
        self.definitions.list().await
    }

    pub async fn get_definition(&self, id: &str) -> Result<Option<WorkflowDef>> {
        self.definitions.get(id).await
    }

    // ------------------------------------------------------------------------
    // Instances
    // ------------------------------------------------------------------------

    /// Start a new instance of definition `def_id` in its initial state
    pub async fn create_instance(&self, def_id: &str) -> Result<WorkflowInst> {
        let def = self
            .definitions
            .get(def_id)
            .await?
            .ok_or_else(|| WorkflowError::DefinitionNotFound(def_id.to_string()))?;

        let inst = WorkflowInst::start(&def).ok_or_else(|| {
            WorkflowError::internal(format!(
                "stored definition '{}' has no unique initial state",
                def.id
            ))
        })?;

        self.instances.insert(inst.clone()).await?;

        tracing::debug!(
            instance_id = %inst.id,
            definition_id = %inst.def_id,
            state = %inst.current_state,
            "Instance created"
        );
        Ok(inst)
    }

    pub async fn list_instances(&self) -> Result<Vec<WorkflowInst>> {
        self.instances.list().await
    }

    pub async fn get_instance(&self, id: &str) -> Result<WorkflowInst> {
        self.instances
            .get(id)
            .await?
            .ok_or_else(|| WorkflowError::InstanceNotFound(id.to_string()))
    }

    /// Execute `action_id` on instance `inst_id`
    ///
    /// The source-state check and the swap run under the instance store's
    /// per-instance lock, so concurrent executions on one instance are
    /// serialized and each sees the state left by the previous one.
    pub async fn execute_action(&self, inst_id: &str, action_id: &str) -> Result<WorkflowInst> {
        let inst = self.get_instance(inst_id).await?;

        let def = self.definitions.get(&inst.def_id).await?.ok_or_else(|| {
            WorkflowError::internal(format!(
                "instance '{}' references missing definition '{}'",
                inst.id, inst.def_id
            ))
        })?;

        let action = def
            .action(action_id)
            .filter(|a| a.enabled)
            .cloned()
            .ok_or_else(|| WorkflowError::ActionInvalid(action_id.to_string()))?;

        let updated = self
            .instances
            .update(
                inst_id,
                Box::new(move |current: &WorkflowInst| {
                    if !action.allows_from(&current.current_state) {
                        return Err(WorkflowError::TransitionNotAllowed {
                            action_id: action.id.clone(),
                            state: current.current_state.clone(),
                        });
                    }
                    Ok(current.advance(&action, Utc::now()))
                }),
            )
            .await?
            .ok_or_else(|| WorkflowError::InstanceNotFound(inst_id.to_string()))?;

        tracing::debug!(
            instance_id = %updated.id,
            action_id = %action_id,
            state = %updated.current_state,
            "Action executed"
        );
        Ok(updated)
    }
}
