//! Route reconstruction from an expansion trace.

use std::collections::HashMap;

use crate::domain::Label;

use super::tree::ExpansionTree;

/// Collapse an expansion trace into the route that reached its last entry.
///
/// `trace` lists every expanded label in expansion order and ends at the
/// goal. The route keeps exactly the traced labels that are tree ancestors
/// of the goal, found by following parent pointers back from the goal in a
/// single pass. Detours that were expanded but never led to the goal drop
/// out.
///
/// Returns an empty route for an empty trace.
pub fn reconstruct_path(trace: &[Label], tree: &ExpansionTree) -> Vec<Label> {
    let Some(goal) = trace.last() else {
        return Vec::new();
    };

    let expanded_at: HashMap<&Label, usize> =
        trace.iter().enumerate().map(|(i, label)| (label, i)).collect();

    let mut route = vec![goal.clone()];
    let mut cursor = goal;
    let mut bound = trace.len() - 1;

    // A parent is always expanded before the children it generated.
    while let Some(parent) = tree.parent(cursor) {
        match expanded_at.get(parent) {
            Some(&at) if at < bound => {
                route.push(parent.clone());
                cursor = parent;
                bound = at;
            }
            _ => break,
        }
    }

    route.reverse();
    route
}
