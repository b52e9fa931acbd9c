//! Order Lifecycle Example - Define a workflow and drive one instance through it
//!
//! Uses in-memory stores only; nothing else is required.
//!
//! Run with: cargo run -p flowrun-core --example order_lifecycle

use flowrun_core::{ActionDef, State, WorkflowDef, WorkflowEngine, WorkflowError};

fn state(id: &str, is_initial: bool, is_final: bool) -> State {
    State {
        id: id.to_string(),
        is_initial,
        is_final,
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

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("=== Order Lifecycle (flowrun-core) ===\n");

    let engine = WorkflowEngine::in_memory();

    // 1. Declare the definition
    let def = WorkflowDef {
        id: "order".to_string(),
        states: vec![
            state("placed", true, false),
            state("paid", false, false),
            state("shipped", false, true),
            state("cancelled", false, true),
        ],
        actions: vec![
            action("pay", &["placed"], "paid"),
            action("ship", &["paid"], "shipped"),
            action("cancel", &["placed", "paid"], "cancelled"),
        ],
    };
    engine.submit_definition(def).await?;

    // 2. Start an instance and walk it forward
    let inst = engine.create_instance("order").await?;
    println!("Started {} in '{}'", inst.id, inst.current_state);

    for action_id in ["pay", "ship", "cancel"] {
        match engine.execute_action(&inst.id, action_id).await {
            Ok(updated) => println!("{action_id:>8} -> '{}'", updated.current_state),
            Err(e @ WorkflowError::TransitionNotAllowed { .. }) => {
                println!("{action_id:>8} rejected: {e}")
            }
            Err(e) => return Err(e.into()),
        }
    }

    // 3. Print the history
    let inst = engine.get_instance(&inst.id).await?;
    println!("\nHistory:");
    for entry in &inst.history {
        println!("  {} at {}", entry.action_id, entry.timestamp);
    }

    Ok(())
}
