// Workflow domain types
//
// These types represent workflow definitions and the instances running them.
// Used by the engine and by the API crate for request/response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// One node in a workflow's state graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct State {
    /// Unique within the owning definition.
    #[cfg_attr(feature = "openapi", schema(example = "draft"))]
    pub id: String,
    /// New instances start in the single state marked initial.
    #[serde(default)]
    pub is_initial: bool,
    #[serde(default)]
    pub is_final: bool,
    /// Carried as data only; entering a disabled state is not prevented.
    #[serde(default)]
    pub enabled: bool,
}

/// A labeled transition, usable from any state in `from_states`, landing on `to_state`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ActionDef {
    #[cfg_attr(feature = "openapi", schema(example = "submit"))]
    pub id: String,
    /// Disabled actions are rejected at execution time. Omitted means disabled.
    #[serde(default)]
    pub enabled: bool,
    /// Source states this action may be executed from. May be empty.
    #[serde(default)]
    pub from_states: Vec<String>,
    pub to_state: String,
}

impl ActionDef {
    /// Whether this action may fire while an instance sits in `state`
    pub fn allows_from(&self, state: &str) -> bool {
        self.from_states.iter().any(|s| s == state)
    }
}

/// Workflow definition: a named set of states and the actions connecting them.
///
/// Immutable once accepted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDef {
    #[cfg_attr(feature = "openapi", schema(example = "document-review"))]
    pub id: String,
    #[serde(default)]
    pub states: Vec<State>,
    #[serde(default)]
    pub actions: Vec<ActionDef>,
}

impl WorkflowDef {
    /// The unique initial state.
    ///
    /// Returns `None` when zero or more than one state is marked initial, which
    /// can only happen for definitions that never passed validation.
    pub fn initial_state(&self) -> Option<&State> {
        let mut initial = self.states.iter().filter(|s| s.is_initial);
        match (initial.next(), initial.next()) {
            (Some(state), None) => Some(state),
            _ => None,
        }
    }

    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.iter().find(|s| s.id == id)
    }

    pub fn action(&self, id: &str) -> Option<&ActionDef> {
        self.actions.iter().find(|a| a.id == id)
    }
}

/// Record of one executed action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub action_id: String,
    pub timestamp: DateTime<Utc>,
}

/// One running execution of a workflow definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WorkflowInst {
    pub id: String,
    /// Id of the definition this instance runs. Resolved on every operation.
    pub def_id: String,
    pub current_state: String,
    /// Executed actions, oldest first.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl WorkflowInst {
    /// Build a fresh instance of `def` positioned on its initial state.
    ///
    /// Returns `None` if `def` has no unique initial state.
    pub fn start(def: &WorkflowDef) -> Option<Self> {
        let initial = def.initial_state()?;
        Some(Self {
            id: Uuid::now_v7().to_string(),
            def_id: def.id.clone(),
            current_state: initial.id.clone(),
            history: Vec::new(),
        })
    }

    /// Derive the instance that results from executing `action` at `at`.
    ///
    /// The receiver is left untouched. The recorded timestamp never precedes the
    /// last history entry, keeping history ordered if the wall clock steps back.
    pub fn advance(&self, action: &ActionDef, at: DateTime<Utc>) -> Self {
        let timestamp = match self.history.last() {
            Some(last) if last.timestamp > at => last.timestamp,
            _ => at,
        };

        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.extend(self.history.iter().cloned());
        history.push(HistoryEntry {
            action_id: action.id.clone(),
            timestamp,
        });

        Self {
            id: self.id.clone(),
            def_id: self.def_id.clone(),
            current_state: action.to_state.clone(),
            history,
        }
    }
}
