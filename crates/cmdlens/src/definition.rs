//! Serde-backed command tree definitions.
//!
//! A tree is an ordinary JSON document:
//!
//! ```json
//! {
//!   "name": "shop",
//!   "children": [
//!     {
//!       "name": "order",
//!       "aliases": ["ord"],
//!       "children": [{"name": "list"}, {"name": "cancel"}]
//!     }
//!   ]
//! }
//! ```
//!
//! `CommandDef` implements the engine's `CommandNode` trait, so a parsed
//! file plugs straight into expansion, leaf collection, and policy
//! gating.

use serde::{Deserialize, Serialize};

use cmdlens_core::CommandNode;

/// One node of a JSON-defined command tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDef {
    /// Canonical command name.
    pub name: String,
    /// Alternative names, matched with the same prefix rules as `name`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Child commands, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CommandDef>,
}

impl CommandDef {
    /// Parse a tree from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl CommandNode for CommandDef {
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
