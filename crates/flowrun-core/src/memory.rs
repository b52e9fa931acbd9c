// In-memory store implementations
//
// These implementations keep all data in process memory. They back the API
// server (nothing is persisted across restarts) and the unit tests.
// Listing returns values in insertion order.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::error::Result;
use crate::traits::{DefinitionStore, InstanceStore, InstanceUpdate};
use crate::workflow::{WorkflowDef, WorkflowInst};

// ============================================================================
// InMemoryDefinitionStore - Stores definitions in memory
// ============================================================================

#[derive(Debug, Default)]
struct DefinitionTable {
    by_id: HashMap<String, WorkflowDef>,
    order: Vec<String>,
}

/// In-memory definition store
///
/// Stores definitions in a HashMap keyed by definition id.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDefinitionStore {
    table: Arc<RwLock<DefinitionTable>>,
}

impl InMemoryDefinitionStore {
    /// Create a new, empty definition store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored definitions
    pub async fn len(&self) -> usize {
        self.table.read().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl DefinitionStore for InMemoryDefinitionStore {
    async fn insert(&self, def: WorkflowDef) -> Result<bool> {
        let mut table = self.table.write().await;
        if table.by_id.contains_key(&def.id) {
            return Ok(false);
        }
        table.order.push(def.id.clone());
        table.by_id.insert(def.id.clone(), def);
        Ok(true)
    }

    async fn get(&self, id: &str) -> Result<Option<WorkflowDef>> {
        Ok(self.table.read().await.by_id.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<WorkflowDef>> {
        let table = self.table.read().await;
        Ok(table
            .order
            .iter()
            .filter_map(|id| table.by_id.get(id).cloned())
            .collect())
    }

    async fn ids(&self) -> Result<Vec<String>> {
        Ok(self.table.read().await.order.clone())
    }
}

// ============================================================================
// InMemoryInstanceStore - Stores instances in memory
// ============================================================================

#[derive(Debug, Default)]
struct InstanceTable {
    by_id: HashMap<String, Arc<Mutex<WorkflowInst>>>,
    order: Vec<String>,
}

/// In-memory instance store
///
/// Each instance sits behind its own mutex. The table lock is held only to
/// find or insert a slot, so updates to different instances never contend
/// while updates to the same instance are serialized.
#[derive(Debug, Default, Clone)]
pub struct InMemoryInstanceStore {
    table: Arc<RwLock<InstanceTable>>,
}

impl InMemoryInstanceStore {
    /// Create a new, empty instance store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored instances
    pub async fn len(&self) -> usize {
        self.table.read().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn slot(&self, id: &str) -> Option<Arc<Mutex<WorkflowInst>>> {
        self.table.read().await.by_id.get(id).cloned()
    }
}

#[async_trait]
impl InstanceStore for InMemoryInstanceStore {
    async fn insert(&self, inst: WorkflowInst) -> Result<()> {
        let mut table = self.table.write().await;
        if let Some(slot) = table.by_id.get(&inst.id).cloned() {
            *slot.lock().await = inst;
            return Ok(());
        }
        table.order.push(inst.id.clone());
        table.by_id.insert(inst.id.clone(), Arc::new(Mutex::new(inst)));
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<WorkflowInst>> {
        match self.slot(id).await {
            Some(slot) => Ok(Some(slot.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<WorkflowInst>> {
        let slots: Vec<Arc<Mutex<WorkflowInst>>> = {
            let table = self.table.read().await;
            table
                .order
                .iter()
                .filter_map(|id| table.by_id.get(id).cloned())
                .collect()
        };

        let mut instances = Vec::with_capacity(slots.len());
        for slot in slots {
            instances.push(slot.lock().await.clone());
        }
        Ok(instances)
    }

    async fn update(&self, id: &str, apply: InstanceUpdate) -> Result<Option<WorkflowInst>> {
        let Some(slot) = self.slot(id).await else {
            return Ok(None);
        };

        let mut current = slot.lock().await;
        let next = apply(&*current)?;
        *current = next.clone();
        Ok(Some(next))
    }
}
