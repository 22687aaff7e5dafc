//! Block variant tags and socket slots.
//!
//! `BlockKind` is the closed set of block variants. Literal descriptions name
//! the variant in their first element; tags are matched exactly (no case
//! folding) and anything unknown becomes a text leaf.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Which variant a block is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Function with an argument chain and a body chain.
    #[strum(serialize = "lambda")]
    Lambda,
    /// Named, typed variable; appendable.
    #[strum(serialize = "var")]
    Var,
    /// Label/type wrapper.
    #[strum(serialize = "bind")]
    Bind,
    /// Literal text leaf; always terminates a chain.
    #[strum(serialize = "text")]
    Text,
}

impl BlockKind {
    /// Resolve a literal tag. Unknown tags fall through to [`BlockKind::Text`].
    pub fn from_tag(tag: &str) -> Self {
        <Self as FromStr>::from_str(tag).unwrap_or(BlockKind::Text)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Lambda => "lambda",
            BlockKind::Var => "var",
            BlockKind::Bind => "bind",
            BlockKind::Text => "text",
        }
    }

    /// Whether blocks of this kind expose a socket that a chain can continue from.
    pub fn is_appendable(&self) -> bool {
        matches!(self, BlockKind::Var)
    }

    /// The sockets a block of this kind owns, in snap-scan order.
    pub fn socket_slots(&self) -> &'static [SocketSlot] {
        match self {
            BlockKind::Lambda => &[SocketSlot::Args, SocketSlot::Body],
            BlockKind::Var => &[SocketSlot::Next],
            BlockKind::Bind | BlockKind::Text => &[],
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Names a socket on its owning block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocketSlot {
    /// Head of a lambda's argument chain.
    Args,
    /// Head of a lambda's body chain.
    Body,
    /// Tail socket of a linear block.
    Next,
}

impl SocketSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocketSlot::Args => "args",
            SocketSlot::Body => "body",
            SocketSlot::Next => "next",
        }
    }
}

impl std::fmt::Display for SocketSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags() {
        assert_eq!(BlockKind::from_tag("lambda"), BlockKind::Lambda);
        assert_eq!(BlockKind::from_tag("var"), BlockKind::Var);
        assert_eq!(BlockKind::from_tag("bind"), BlockKind::Bind);
    }

    #[test]
    fn test_unknown_tags_become_text() {
        assert_eq!(BlockKind::from_tag("return"), BlockKind::Text);
        assert_eq!(BlockKind::from_tag(""), BlockKind::Text);
        // Matching is exact, like the literal format expects.
        assert_eq!(BlockKind::from_tag("Lambda"), BlockKind::Text);
    }

    #[test]
    fn test_socket_slots_per_kind() {
        assert_eq!(BlockKind::Lambda.socket_slots(), &[SocketSlot::Args, SocketSlot::Body]);
        assert_eq!(BlockKind::Var.socket_slots(), &[SocketSlot::Next]);
        assert!(BlockKind::Text.socket_slots().is_empty());
        assert!(BlockKind::Var.is_appendable());
        assert!(!BlockKind::Lambda.is_appendable());
    }
}
