//! Command tree capability trait and leaf collection.
//!
//! The engine never owns a command tree; it borrows one through the
//! [`CommandNode`] trait. Any structure that can name itself, list its
//! aliases, and hand out an ordered slice of children qualifies — the
//! interactive program's live command registry and a synthetic leaf
//! enumeration for tool exposure both fit without a shared base type.

use serde::{Deserialize, Serialize};

/// Minimal capability set a command tree node must expose.
///
/// Sibling names are not guaranteed unique; resolution tolerates
/// duplicates (the full candidate list is surfaced on ambiguity).
pub trait CommandNode: Sized {
    /// Canonical name of this command.
    fn name(&self) -> &str;

    /// Alternative names, matched with the same prefix rules as `name`.
    fn aliases(&self) -> &[String];

    /// Child commands, in declaration order.
    fn children(&self) -> &[Self];
}

/// One leaf command, flattened out of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafEntry {
    /// Canonical segment names from the root (exclusive) to this leaf.
    pub segments: Vec<String>,
    /// `segments` lower-cased and joined with `:`, the form policy
    /// matching operates on.
    pub command_path: String,
}

impl LeafEntry {
    fn from_segments(segments: &[String]) -> Self {
        LeafEntry {
            command_path: segments.join(":").to_lowercase(),
            segments: segments.to_vec(),
        }
    }
}

/// Flatten a command tree into its leaf commands, in pre-order.
///
/// The root node itself is treated as a wrapper and contributes no
/// segment; a node with children is never a leaf. An empty tree (root
/// with no children) yields an empty list.
pub fn collect_leaves<N: CommandNode>(root: &N) -> Vec<LeafEntry> {
    let mut leaves = Vec::new();
    let mut segments = Vec::new();
    for child in root.children() {
        visit(child, &mut segments, &mut leaves);
    }
    leaves
}

fn visit<N: CommandNode>(node: &N, segments: &mut Vec<String>, leaves: &mut Vec<LeafEntry>) {
    segments.push(node.name().to_string());
    if node.children().is_empty() {
        leaves.push(LeafEntry::from_segments(segments));
    } else {
        for child in node.children() {
            visit(child, segments, leaves);
        }
    }
    segments.pop();
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::CommandNode;

    /// Plain owned tree node for engine tests.
    #[derive(Debug, Clone)]
    pub struct TestNode {
        pub name: String,
        pub aliases: Vec<String>,
        pub children: Vec<TestNode>,
    }

    impl TestNode {
        pub fn new(name: &str) -> Self {
            TestNode {
                name: name.to_string(),
                aliases: Vec::new(),
                children: Vec::new(),
            }
        }

        pub fn alias(mut self, alias: &str) -> Self {
            self.aliases.push(alias.to_string());
            self
        }

        pub fn child(mut self, child: TestNode) -> Self {
            self.children.push(child);
            self
        }
    }

    impl CommandNode for TestNode {
        fn name(&self) -> &str {
            &self.name
        }

        fn aliases(&self) -> &[String] {
            &self.aliases
        }

        fn children(&self) -> &[Self] {
            &self.children
        }
    }
}
