// Definition validation
//
// A candidate definition is checked by an ordered list of guard clauses. The
// first failing check decides the rejection, so the order below is part of the
// observable behavior:
//
// 1. id not already taken
// 2. exactly one initial state
// 3. distinct state ids
// 4. distinct action ids
// 5. per action, in declaration order: `to_state`, then `from_states` resolve

use std::collections::HashSet;

use crate::error::DefinitionError;
use crate::workflow::WorkflowDef;

/// Validate `candidate` against the ids already present in the definition store.
///
/// Has no side effects; storing an accepted definition is the caller's job.
pub fn validate(
    candidate: &WorkflowDef,
    existing_ids: &HashSet<String>,
) -> Result<(), DefinitionError> {
    if existing_ids.contains(&candidate.id) {
        return Err(DefinitionError::DuplicateDefinition(candidate.id.clone()));
    }

    let initial_count = candidate.states.iter().filter(|s| s.is_initial).count();
    if initial_count != 1 {
        return Err(DefinitionError::InvalidInitialStateCount(initial_count));
    }

    let mut state_ids = HashSet::with_capacity(candidate.states.len());
    for state in &candidate.states {
        if !state_ids.insert(state.id.as_str()) {
            return Err(DefinitionError::DuplicateStateId(state.id.clone()));
        }
    }

    let mut action_ids = HashSet::with_capacity(candidate.actions.len());
    for action in &candidate.actions {
        if !action_ids.insert(action.id.as_str()) {
            return Err(DefinitionError::DuplicateActionId(action.id.clone()));
        }
    }

    for action in &candidate.actions {
        if !state_ids.contains(action.to_state.as_str()) {
            return Err(DefinitionError::UnknownToState {
                action_id: action.id.clone(),
                to_state: action.to_state.clone(),
            });
        }

        let mut seen = HashSet::new();
        let unresolved: Vec<String> = action
            .from_states
            .iter()
            .filter(|s| !state_ids.contains(s.as_str()) && seen.insert(s.as_str()))
            .cloned()
            .collect();
        if !unresolved.is_empty() {
            return Err(DefinitionError::UnknownFromStates {
                action_id: action.id.clone(),
                states: unresolved,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::{ActionDef, State};

    fn state(id: &str, is_initial: bool) -> State {
        State {
            id: id.to_string(),
            is_initial,
            is_final: false,
            enabled: true,
        }
    }

    fn action(id: &str, from: &[&str], to: &str) -> ActionDef {
        ActionDef {
            id: id.to_string(),
            enabled: true,
            from_states: from.iter().map(|s| s.to_string()).collect(),
            to_state: to.to_string(),
        }
    }

    fn valid_def() -> WorkflowDef {
        WorkflowDef {
            id: "d1".to_string(),
            states: vec![state("s0", true), state("s1", false)],
            actions: vec![action("go", &["s0"], "s1")],
        }
    }

    fn no_ids() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn test_accepts_valid_definition() {
        assert_eq!(validate(&valid_def(), &no_ids()), Ok(()));
    }

    #[test]
    fn test_rejects_taken_id() {
        let existing: HashSet<String> = ["d1".to_string()].into_iter().collect();
        assert_eq!(
            validate(&valid_def(), &existing),
            Err(DefinitionError::DuplicateDefinition("d1".to_string()))
        );
    }

    #[test]
    fn test_rejects_zero_initial_states() {
        let mut def = valid_def();
        def.states[0].is_initial = false;
        assert_eq!(
            validate(&def, &no_ids()),
            Err(DefinitionError::InvalidInitialStateCount(0))
        );
    }

    #[test]
    fn test_rejects_two_initial_states() {
        let mut def = valid_def();
        def.states[1].is_initial = true;
        assert_eq!(
            validate(&def, &no_ids()),
            Err(DefinitionError::InvalidInitialStateCount(2))
        );
    }

    #[test]
    fn test_rejects_empty_states() {
        let def = WorkflowDef {
            id: "empty".to_string(),
            states: vec![],
            actions: vec![],
        };
        assert_eq!(
            validate(&def, &no_ids()),
            Err(DefinitionError::InvalidInitialStateCount(0))
        );
    }

    #[test]
    fn test_rejects_duplicate_state_id() {
        let mut def = valid_def();
        def.states.push(state("s1", false));
        assert_eq!(
            validate(&def, &no_ids()),
            Err(DefinitionError::DuplicateStateId("s1".to_string()))
        );
    }

    #[test]
    fn test_rejects_duplicate_action_id() {
        let mut def = valid_def();
        def.actions.push(action("go", &["s1"], "s0"));
        assert_eq!(
            validate(&def, &no_ids()),
            Err(DefinitionError::DuplicateActionId("go".to_string()))
        );
    }

    #[test]
    fn test_rejects_unknown_to_state() {
        let mut def = valid_def();
        def.actions.push(action("jump", &["s0"], "nowhere"));
        assert_eq!(
            validate(&def, &no_ids()),
            Err(DefinitionError::UnknownToState {
                action_id: "jump".to_string(),
                to_state: "nowhere".to_string(),
            })
        );
    }

    #[test]
    fn test_rejects_unknown_from_states_listing_all() {
        let mut def = valid_def();
        def.actions.push(action("back", &["x", "s1", "y"], "s0"));
        assert_eq!(
            validate(&def, &no_ids()),
            Err(DefinitionError::UnknownFromStates {
                action_id: "back".to_string(),
                states: vec!["x".to_string(), "y".to_string()],
            })
        );
    }

    #[test]
    fn test_unknown_from_states_listed_once() {
        let mut def = valid_def();
        def.actions.push(action("back", &["q", "s1", "p", "q"], "s0"));
        let err = validate(&def, &no_ids()).unwrap_err();
        assert_eq!(
            err,
            DefinitionError::UnknownFromStates {
                action_id: "back".to_string(),
                states: vec!["q".to_string(), "p".to_string()],
            }
        );
        assert_eq!(err.to_string(), "Action 'back' has invalid FromStates: q, p.");
    }

    #[test]
    fn test_first_failure_wins() {
        // Taken id, no initial state, duplicate states and a dangling action all at once
        let def = WorkflowDef {
            id: "d1".to_string(),
            states: vec![state("a", false), state("a", false)],
            actions: vec![action("x", &["zz"], "zz"), action("x", &[], "a")],
        };
        let existing: HashSet<String> = ["d1".to_string()].into_iter().collect();

        assert_eq!(
            validate(&def, &existing),
            Err(DefinitionError::DuplicateDefinition("d1".to_string()))
        );
        assert_eq!(
            validate(&def, &no_ids()),
            Err(DefinitionError::InvalidInitialStateCount(0))
        );

        let mut def = def;
        def.states[0].is_initial = true;
        assert_eq!(
            validate(&def, &no_ids()),
            Err(DefinitionError::DuplicateStateId("a".to_string()))
        );

        def.states[1].id = "b".to_string();
        assert_eq!(
            validate(&def, &no_ids()),
            Err(DefinitionError::DuplicateActionId("x".to_string()))
        );

        def.actions[1].id = "y".to_string();
        assert_eq!(
            validate(&def, &no_ids()),
            Err(DefinitionError::UnknownToState {
                action_id: "x".to_string(),
                to_state: "zz".to_string(),
            })
        );
    }

    #[test]
    fn test_to_state_checked_before_from_states() {
        let mut def = valid_def();
        def.actions = vec![action("go", &["bad-from"], "bad-to")];
        assert!(matches!(
            validate(&def, &no_ids()),
            Err(DefinitionError::UnknownToState { .. })
        ));
    }

    #[test]
    fn test_actions_checked_in_declaration_order() {
        let mut def = valid_def();
        def.actions = vec![
            action("first", &["missing"], "s1"),
            action("second", &["s0"], "missing"),
        ];
        assert_eq!(
            validate(&def, &no_ids()),
            Err(DefinitionError::UnknownFromStates {
                action_id: "first".to_string(),
                states: vec!["missing".to_string()],
            })
        );
    }

    #[test]
    fn test_allows_no_actions_empty_from_states_and_self_loops() {
        let mut def = valid_def();
        def.actions.clear();
        assert_eq!(validate(&def, &no_ids()), Ok(()));

        def.actions = vec![action("never", &[], "s1"), action("stay", &["s0"], "s0")];
        assert_eq!(validate(&def, &no_ids()), Ok(()));
    }
}
