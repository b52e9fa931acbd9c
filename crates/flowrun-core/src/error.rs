// Error types for definition validation and instance transitions

use thiserror::Error;

/// Result type alias for workflow operations
pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Reasons a submitted definition is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("Definition '{0}' already exists.")]
    DuplicateDefinition(String),

    /// Number of states marked initial (anything other than one)
    #[error("Exactly one state must be marked IsInitial.")]
    InvalidInitialStateCount(usize),

    #[error("State IDs must be unique.")]
    DuplicateStateId(String),

    #[error("Action IDs must be unique.")]
    DuplicateActionId(String),

    #[error("Action '{action_id}' has unknown ToState '{to_state}'.")]
    UnknownToState { action_id: String, to_state: String },

    #[error("Action '{action_id}' has invalid FromStates: {}.", states.join(", "))]
    UnknownFromStates {
        action_id: String,
        states: Vec<String>,
    },
}

impl DefinitionError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            DefinitionError::DuplicateDefinition(_) => "duplicate_definition",
            DefinitionError::InvalidInitialStateCount(_) => "invalid_initial_state_count",
            DefinitionError::DuplicateStateId(_) => "duplicate_state_id",
            DefinitionError::DuplicateActionId(_) => "duplicate_action_id",
            DefinitionError::UnknownToState { .. } => "unknown_to_state",
            DefinitionError::UnknownFromStates { .. } => "unknown_from_states",
        }
    }
}

/// Errors returned by the workflow engine
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Submitted definition failed validation
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error("Definition '{0}' not found.")]
    DefinitionNotFound(String),

    #[error("Instance '{0}' not found.")]
    InstanceNotFound(String),

    /// Action unknown to the instance's definition, or disabled
    #[error("Action '{0}' is invalid or disabled.")]
    ActionInvalid(String),

    #[error("Action '{action_id}' not allowed from state '{state}'.")]
    TransitionNotAllowed { action_id: String, state: String },

    /// Backing store failure
    #[error("Store error: {0}")]
    Store(String),

    /// A stored value violates an invariant the validator guarantees
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WorkflowError {
    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        WorkflowError::Store(msg.into())
    }

    /// Create an internal-consistency error
    pub fn internal(msg: impl Into<String>) -> Self {
        WorkflowError::Internal(msg.into())
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            WorkflowError::Definition(e) => e.code(),
            WorkflowError::DefinitionNotFound(_) => "definition_not_found",
            WorkflowError::InstanceNotFound(_) => "instance_not_found",
            WorkflowError::ActionInvalid(_) => "action_invalid",
            WorkflowError::TransitionNotAllowed { .. } => "transition_not_allowed",
            WorkflowError::Store(_) => "store_error",
            WorkflowError::Internal(_) => "internal_error",
        }
    }
}
