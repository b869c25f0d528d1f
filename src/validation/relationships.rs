//! Relationship validation functionality
//!
//! The compiler emits tables in schema discovery order and does not sort
//! them. Engines that cannot tolerate forward references use
//! [`creation_order`] to create referenced tables first.

use std::collections::{BTreeSet, HashMap};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::models::TableDefinition;

/// Error during relationship validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelationshipValidationError {
    /// Tables reference each other in a cycle; no creation order satisfies them
    #[error("Circular foreign key references between tables: {}", tables.join(", "))]
    CyclicReferences { tables: Vec<String> },
}

/// Order tables so that every referenced table precedes the tables that
/// reference it.
///
/// Ties keep input order. Self references are ignored, and references to
/// tables outside `tables` are ignored.
pub fn creation_order(
    tables: &[TableDefinition],
) -> Result<Vec<&TableDefinition>, RelationshipValidationError> {
    let graph = build_reference_graph(tables);

    let mut in_degree: Vec<usize> = graph
        .node_indices()
        .map(|node| graph.neighbors_directed(node, Direction::Incoming).count())
        .collect();

    let mut ready: BTreeSet<usize> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, degree)| **degree == 0)
        .map(|(index, _)| index)
        .collect();

    let mut ordered = Vec::with_capacity(tables.len());
    while let Some(index) = ready.pop_first() {
        ordered.push(&tables[index]);
        for dependent in graph.neighbors_directed(NodeIndex::new(index), Direction::Outgoing) {
            let degree = &mut in_degree[dependent.index()];
            *degree -= 1;
            if *degree == 0 {
                ready.insert(dependent.index());
            }
        }
    }

    if ordered.len() < tables.len() {
        return Err(RelationshipValidationError::CyclicReferences {
            tables: cycle_members(&graph, tables),
        });
    }

    Ok(ordered)
}

/// Edges run from a referenced table to each table referencing it; parallel
/// edges are collapsed so in-degrees count distinct tables.
fn build_reference_graph(tables: &[TableDefinition]) -> DiGraph<usize, ()> {
    let mut graph = DiGraph::with_capacity(tables.len(), tables.len());
    let mut by_name = HashMap::new();
    for (index, table) in tables.iter().enumerate() {
        let node = graph.add_node(index);
        by_name.entry(table.name.as_str()).or_insert(node);
    }

    for (index, table) in tables.iter().enumerate() {
        let referencing = NodeIndex::new(index);
        for fk in &table.foreign_keys {
            if fk.is_self_reference(&table.name) {
                continue;
            }
            if let Some(&referenced) = by_name.get(fk.references_table.as_str()) {
                if graph.find_edge(referenced, referencing).is_none() {
                    graph.add_edge(referenced, referencing, ());
                }
            }
        }
    }
    graph
}

fn cycle_members(graph: &DiGraph<usize, ()>, tables: &[TableDefinition]) -> Vec<String> {
    let mut members: Vec<usize> = tarjan_scc(graph)
        .into_iter()
        .filter(|component| component.len() > 1)
        .flatten()
        .map(|node| graph[node])
        .collect();
    members.sort_unstable();
    members
        .into_iter()
        .map(|index| tables[index].name.clone())
        .collect()
}
