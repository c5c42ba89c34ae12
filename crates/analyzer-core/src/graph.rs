//! Pure graph metrics over the deduplicated dependency edge set
//! (`spec.md` §4.8). No filesystem access: everything here is a function of
//! `(nodes, edges)`.

use std::collections::{HashMap, HashSet};

use crate::types::{Dependency, Node};

/// Per-node reference counts, keyed by the node's string key
/// ([`Node::as_key`]).
pub fn reference_counts(deps: &[Dependency]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for dep in deps {
        *counts.entry(dep.to.clone()).or_insert(0usize) += 1;
    }
    counts
}

/// A file path is used iff it appears as a source or a sink of some edge.
pub fn is_used(path: &str, deps: &[Dependency]) -> bool {
    deps.iter().any(|d| d.from == path || d.to == path)
}

/// Adjacency restricted to real project-to-project edges — synthetic
/// `[External]`/`[Missing]`/`[DB:*]` targets never participate in cycle
/// detection or critical-path search (`spec.md` §4.8).
fn project_adjacency(deps: &[Dependency]) -> HashMap<String, Vec<String>> {
    let mut adjacency: HashMap<String, Vec<String>> = HashMap::new();
    for dep in deps {
        if is_project_node(&dep.to) {
            adjacency.entry(dep.from.clone()).or_default().push(dep.to.clone());
        }
    }
    adjacency
}

fn is_project_node(key: &str) -> bool {
    !(key.starts_with("[External] ") || key.starts_with("[Missing] ") || key.starts_with("[DB:"))
}

/// Canonical cycle key: the unordered set of nodes in the cycle, sorted
/// lexicographically and joined with `-`. Two cycles with the same node set
/// (regardless of rotation/direction) collapse to one report.
fn canonical_key(cycle: &[String]) -> String {
    let mut nodes: Vec<&str> = cycle.iter().map(|s| s.as_str()).collect();
    nodes.sort_unstable();
    nodes.dedup();
    nodes.join("-")
}

/// Enumerate simple cycles in the real-project subgraph via DFS, reporting
/// each distinct node-set exactly once. Each reported cycle is the ordered
/// sequence of nodes starting at the first revisited node.
pub fn find_cycles(deps: &[Dependency]) -> Vec<Vec<String>> {
    let adjacency = project_adjacency(deps);
    let mut nodes: Vec<&String> = adjacency.keys().collect();
    nodes.sort();

    let mut reported: HashSet<String> = HashSet::new();
    let mut cycles = Vec::new();

    for start in nodes {
        let mut stack: Vec<String> = Vec::new();
        let mut on_stack: HashSet<String> = HashSet::new();
        dfs_cycles(start, &adjacency, &mut stack, &mut on_stack, &mut reported, &mut cycles);
    }

    cycles
}

fn dfs_cycles(
    node: &str,
    adjacency: &HashMap<String, Vec<String>>,
    stack: &mut Vec<String>,
    on_stack: &mut HashSet<String>,
    reported: &mut HashSet<String>,
    cycles: &mut Vec<Vec<String>>,
) {
    stack.push(node.to_string());
    on_stack.insert(node.to_string());

    if let Some(neighbors) = adjacency.get(node) {
        for next in neighbors {
            if on_stack.contains(next) {
                let start_idx = stack.iter().position(|n| n == next).unwrap();
                let cycle: Vec<String> = stack[start_idx..].to_vec();
                let key = canonical_key(&cycle);
                if reported.insert(key) {
                    cycles.push(cycle);
                }
            } else {
                dfs_cycles(next, adjacency, stack, on_stack, reported, cycles);
            }
        }
    }

    stack.pop();
    on_stack.remove(node);
}

/// Approximate the longest simple path in the real-project subgraph. Runs a
/// path-local (not globally memoized) DFS from every node, keeping the
/// longest sequence seen; ties are broken by first-found. This is a
/// heuristic, not an exact longest-path solver — simple-path longest-path is
/// NP-hard in general, and the per-exploration visited set keeps the search
/// bounded on real workspaces.
pub fn critical_path(deps: &[Dependency]) -> Vec<String> {
    let adjacency = project_adjacency(deps);
    let mut nodes: Vec<&String> = adjacency.keys().collect();
    nodes.sort();

    let mut best: Vec<String> = Vec::new();
    for start in nodes {
        let mut visited = HashSet::new();
        let mut path = Vec::new();
        dfs_longest(start, &adjacency, &mut visited, &mut path, &mut best);
    }
    best
}

fn dfs_longest(
    node: &str,
    adjacency: &HashMap<String, Vec<String>>,
    visited: &mut HashSet<String>,
    path: &mut Vec<String>,
    best: &mut Vec<String>,
) {
    visited.insert(node.to_string());
    path.push(node.to_string());

    if path.len() > best.len() {
        *best = path.clone();
    }

    if let Some(neighbors) = adjacency.get(node) {
        for next in neighbors {
            if !visited.contains(next) {
                dfs_longest(next, adjacency, visited, path, best);
            }
        }
    }

    path.pop();
    visited.remove(node);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouplingStats {
    pub fan_in: HashMap<String, usize>,
    pub fan_out: HashMap<String, usize>,
    pub coupling: usize,
    pub average_coupling: f64,
}

/// Per-node fan-in/fan-out over all edges (synthetic targets included, per
/// `spec.md` §4.8 — only cycle/critical-path restrict to real project
/// nodes), plus aggregate coupling.
pub fn coupling(deps: &[Dependency], total_nodes: usize) -> CouplingStats {
    let mut fan_in: HashMap<String, usize> = HashMap::new();
    let mut fan_out: HashMap<String, usize> = HashMap::new();

    for dep in deps {
        *fan_out.entry(dep.from.clone()).or_insert(0) += 1;
        *fan_in.entry(dep.to.clone()).or_insert(0) += 1;
    }

    let coupling: usize = fan_out.values().sum();
    let average_coupling = if total_nodes == 0 {
        0.0
    } else {
        coupling as f64 / total_nodes as f64
    };

    CouplingStats {
        fan_in,
        fan_out,
        coupling,
        average_coupling,
    }
}
