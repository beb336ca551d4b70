//! Expansion tree: the append-only record of every state the search generated.
//!
//! Each node stores its label, the g and h costs it was generated with, a
//! pointer to the parent that generated it, and its children in generation
//! order. The first insertion of a label wins; later attempts to add the
//! same label are ignored, so every non-root node has exactly one parent.
//!
//! Route reconstruction walks the parent pointers. Everything else here
//! (iteration, DOT export) exists for callers that display the search.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use serde::Serialize;

use crate::domain::{Label, State};

/// Error from tree construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A child was added under a label the tree has never seen
    #[error("parent {0} is not in the expansion tree")]
    UnknownParent(Label),

    /// A second root was added
    #[error("expansion tree already has root {0}")]
    RootExists(Label),
}

/// One generated state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub label: Label,
    pub parent: Option<Label>,
    pub g: Option<f64>,
    pub h: Option<f64>,
    #[serde(skip)]
    children: Vec<usize>,
    #[serde(skip)]
    parent_index: Option<usize>,
}

/// Append-only parent → child record of a search.
#[derive(Debug, Clone, Default)]
pub struct ExpansionTree {
    nodes: Vec<TreeNode>,
    index: HashMap<Label, usize>,
}

impl ExpansionTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the root state. A tree has exactly one root.
    pub fn add_root(&mut self, state: &State) -> Result<(), TreeError> {
        if let Some(root) = self.nodes.first() {
            return Err(TreeError::RootExists(root.label.clone()));
        }
        self.insert(state, None);
        Ok(())
    }

    /// Record `child` as generated by `parent`.
    ///
    /// Returns `Ok(false)` without changing anything if `child` is already in
    /// the tree.
    pub fn add_child(&mut self, parent: &Label, child: &State) -> Result<bool, TreeError> {
        let &parent_index = self
            .index
            .get(parent)
            .ok_or_else(|| TreeError::UnknownParent(parent.clone()))?;

        if self.index.contains_key(child.label()) {
            return Ok(false);
        }

        let child_index = self.insert(child, Some(parent_index));
        self.nodes[parent_index].children.push(child_index);
        Ok(true)
    }

    /// Record every state in `children` as generated by `parent`.
    pub fn add_children(&mut self, parent: &Label, children: &[State]) -> Result<(), TreeError> {
        for child in children {
            self.add_child(parent, child)?;
        }
        Ok(())
    }

    fn insert(&mut self, state: &State, parent_index: Option<usize>) -> usize {
        let index = self.nodes.len();
        let parent = parent_index.map(|p| self.nodes[p].label.clone());
        self.nodes.push(TreeNode {
            label: state.label().clone(),
            parent,
            g: state.g(),
            h: state.h(),
            children: Vec::new(),
            parent_index,
        });
        self.index.insert(state.label().clone(), index);
        index
    }

    /// Look up a node by label.
    pub fn get(&self, label: &Label) -> Option<&TreeNode> {
        self.index.get(label).map(|&i| &self.nodes[i])
    }

    /// Check whether a label has been generated.
    pub fn contains(&self, label: &Label) -> bool {
        self.index.contains_key(label)
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<&TreeNode> {
        self.nodes.first()
    }

    /// Parent of `label`, or `None` for the root and unknown labels.
    pub fn parent(&self, label: &Label) -> Option<&Label> {
        self.get(label)?.parent.as_ref()
    }

    /// Children of `label` in generation order.
    pub fn children<'a>(&'a self, label: &Label) -> impl Iterator<Item = &'a Label> + 'a {
        self.index
            .get(label)
            .into_iter()
            .flat_map(move |&i| self.nodes[i].children.iter())
            .map(move |&c| &self.nodes[c].label)
    }

    /// Labels from the root down to `label`, inclusive.
    ///
    /// Empty if `label` is not in the tree.
    pub fn ancestry(&self, label: &Label) -> Vec<Label> {
        let mut chain = Vec::new();
        let mut cursor = self.index.get(label).copied();
        while let Some(i) = cursor {
            chain.push(self.nodes[i].label.clone());
            cursor = self.nodes[i].parent_index;
        }
        chain.reverse();
        chain
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Render the tree as Graphviz DOT, filling the nodes of `route` in red.
    pub fn to_dot(&self, route: &[Label]) -> String {
        let on_route: HashSet<&Label> = route.iter().collect();
        let mut dot = String::from("digraph expansion {\n    node [shape=box, style=filled];\n");

        for node in &self.nodes {
            let colour = if on_route.contains(&node.label) {
                "red"
            } else {
                "lightblue"
            };
            let _ = writeln!(
                dot,
                "    \"{}\" [label=\"{}\\ng: {}; h: {}\", fillcolor={}];",
                node.label,
                node.label,
                format_cost(node.g),
                format_cost(node.h),
                colour
            );
        }
        for node in &self.nodes {
            if let Some(parent) = &node.parent {
                let _ = writeln!(dot, "    \"{}\" -> \"{}\";", parent, node.label);
            }
        }

        dot.push_str("}\n");
        dot
    }
}

fn format_cost(cost: Option<f64>) -> String {
    match cost {
        Some(c) => format!("{c:.2}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> Label {
        Label::parse(s).unwrap()
    }

    fn state(s: &str, g: f64, h: f64) -> State {
        State::with_costs(label(s), g, h)
    }

    fn sample() -> ExpansionTree {
        let mut tree = ExpansionTree::new();
        tree.add_root(&state("E1r", 0.0, 9.0)).unwrap();
        tree.add_children(&label("E1r"), &[state("E2r", 5.0, 4.0)])
            .unwrap();
        tree.add_children(
            &label("E2r"),
            &[state("E3r", 7.0, 6.0), state("E2g", 8.0, 4.0)],
        )
        .unwrap();
        tree
    }

    #[test]
    fn records_parents_and_costs() {
        let tree = sample();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.root().unwrap().label, label("E1r"));
        assert_eq!(tree.parent(&label("E2g")), Some(&label("E2r")));
        assert_eq!(tree.parent(&label("E1r")), None);

        let node = tree.get(&label("E3r")).unwrap();
        assert_eq!(node.g, Some(7.0));
        assert_eq!(node.h, Some(6.0));
    }

    #[test]
    fn children_in_generation_order() {
        let tree = sample();
        let children: Vec<_> = tree.children(&label("E2r")).cloned().collect();
        assert_eq!(children, vec![label("E3r"), label("E2g")]);
        assert_eq!(tree.children(&label("E3r")).count(), 0);
        assert_eq!(tree.children(&label("E9y")).count(), 0);
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let mut tree = ExpansionTree::new();
        tree.add_root(&state("E1r", 0.0, 0.0)).unwrap();

        let err = tree
            .add_child(&label("E5y"), &state("E4y", 1.0, 0.0))
            .unwrap_err();
        assert_eq!(err, TreeError::UnknownParent(label("E5y")));
        assert_eq!(err.to_string(), "parent E5y is not in the expansion tree");
        assert!(!tree.contains(&label("E4y")));
    }

    #[test]
    fn child_before_root_is_rejected() {
        let mut tree = ExpansionTree::new();
        assert!(tree.add_child(&label("E1r"), &state("E2r", 1.0, 0.0)).is_err());
        assert!(tree.is_empty());
    }

    #[test]
    fn second_root_is_rejected() {
        let mut tree = sample();
        assert_eq!(
            tree.add_root(&state("E9y", 0.0, 0.0)),
            Err(TreeError::RootExists(label("E1r")))
        );
    }

    #[test]
    fn first_insertion_wins() {
        let mut tree = sample();
        let added = tree
            .add_child(&label("E3r"), &state("E2g", 20.0, 4.0))
            .unwrap();

        assert!(!added);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.parent(&label("E2g")), Some(&label("E2r")));
        assert_eq!(tree.get(&label("E2g")).unwrap().g, Some(8.0));
    }

    #[test]
    fn ancestry_from_root() {
        let tree = sample();
        assert_eq!(
            tree.ancestry(&label("E2g")),
            vec![label("E1r"), label("E2r"), label("E2g")]
        );
        assert_eq!(tree.ancestry(&label("E1r")), vec![label("E1r")]);
        assert!(tree.ancestry(&label("E9y")).is_empty());
    }

    #[test]
    fn dot_export_highlights_route() {
        let tree = sample();
        let dot = tree.to_dot(&[label("E1r"), label("E2r"), label("E2g")]);

        assert!(dot.starts_with("digraph expansion {"));
        assert!(dot.contains("\"E1r\" -> \"E2r\";"));
        assert!(dot.contains("\"E2r\" -> \"E3r\";"));
        assert!(dot.contains("\"E2g\" [label=\"E2g\\ng: 8.00; h: 4.00\", fillcolor=red];"));
        assert!(dot.contains("\"E3r\" [label=\"E3r\\ng: 7.00; h: 6.00\", fillcolor=lightblue];"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn nodes_serialize_without_internal_indices() {
        let tree = sample();
        let json = serde_json::to_value(&tree.nodes()[1]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"label": "E2r", "parent": "E1r", "g": 5.0, "h": 4.0})
        );
    }
}
