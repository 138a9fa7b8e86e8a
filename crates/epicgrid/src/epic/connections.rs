//! Connection extraction: turning `dependsOn` lists into the `(from, to)`
//! edge lists the layout engine and routers consume.
//!
//! Extraction filters by scope instead of failing: a task dependency that
//! points outside its batch is dropped here and resurfaces one level up as
//! a derived batch edge.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::layout::{Connection, NodeId};

use super::{Batch, Epic};

/// Intra-batch task connections, in document order.
pub fn task_connections(batch: &Batch) -> Vec<Connection> {
    let in_scope: HashSet<NodeId> = batch.tasks.iter().map(|t| t.id).collect();

    let mut connections = Vec::new();
    for task in &batch.tasks {
        for &dep in &task.depends_on {
            if in_scope.contains(&dep) {
                connections.push(Connection::new(dep, task.id));
            }
        }
    }
    connections
}

/// Batch connections declared on the batches themselves, restricted to
/// batches present in the epic.
pub fn declared_batch_connections(epic: &Epic) -> Vec<Connection> {
    let in_scope: HashSet<NodeId> = epic.batches.iter().map(|b| b.id).collect();

    let mut connections = Vec::new();
    for batch in &epic.batches {
        for &dep in &batch.depends_on {
            if in_scope.contains(&dep) {
                connections.push(Connection::new(dep, batch.id));
            }
        }
    }
    connections
}

/// Batch connections derived from cross-batch task dependencies: a task
/// depending on a task that lives in another batch links the two batches.
/// Each batch pair appears once, self-links never.
pub fn derived_batch_connections(epic: &Epic) -> Vec<Connection> {
    let mut owner: HashMap<NodeId, NodeId> = HashMap::new();
    for batch in &epic.batches {
        for task in &batch.tasks {
            owner.insert(task.id, batch.id);
        }
    }

    let mut seen = BTreeSet::new();
    let mut connections = Vec::new();
    for batch in &epic.batches {
        for task in &batch.tasks {
            for &dep in &task.depends_on {
                let Some(&from) = owner.get(&dep) else {
                    continue;
                };
                if from != batch.id && seen.insert((from, batch.id)) {
                    connections.push(Connection::new(from, batch.id));
                }
            }
        }
    }
    connections
}

/// Order-preserving dedup. The routers draw every connection they are
/// given, so merged declared+derived sets pass through here first.
pub fn dedup(connections: Vec<Connection>) -> Vec<Connection> {
    let mut seen = HashSet::new();
    connections
        .into_iter()
        .filter(|c| seen.insert((c.from, c.to)))
        .collect()
}
