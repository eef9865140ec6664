//! Static description of a constructed tree, for tests, tooling and the CLI.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeType {
    Sequence,
    Selector,
    Condition,
    BlackboardCondition,
    Service,
    Wait,
    Action,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Sequence => "Sequence",
            NodeType::Selector => "Selector",
            NodeType::Condition => "Condition",
            NodeType::BlackboardCondition => "BlackboardCondition",
            NodeType::Service => "Service",
            NodeType::Wait => "Wait",
            NodeType::Action => "Action",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeShape {
    pub node_type: NodeType,
    pub name: String,
    pub children: Vec<NodeShape>,
}

impl NodeShape {
    pub fn leaf(node_type: NodeType, name: impl Into<String>) -> Self {
        Self::branch(node_type, name, Vec::new())
    }

    pub fn branch(node_type: NodeType, name: impl Into<String>, children: Vec<NodeShape>) -> Self {
        Self {
            node_type,
            name: name.into(),
            children,
        }
    }

    pub fn child(&self, index: usize) -> Option<&NodeShape> {
        self.children.get(index)
    }

    /// Depth-first search by node name.
    pub fn find(&self, name: &str) -> Option<&NodeShape> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(NodeShape::node_count).sum::<usize>()
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}{}", "", self.node_type, indent = depth * 2)?;
        if !self.name.is_empty() {
            write!(f, " {}", self.name)?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
