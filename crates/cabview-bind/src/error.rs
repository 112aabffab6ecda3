//! Fatal binding errors and non-fatal diagnostics.

use std::fmt;

use thiserror::Error;

use crate::resolver::Category;

/// Errors that stop a bind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// The model root is absent or not in the scene.
    #[error("Cabinet has no model to bind")]
    MissingModel,
}

/// A problem found while binding that does not stop the bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The resolver had nothing for a name, nor for its default.
    ResolutionMiss {
        /// What kind of asset was looked up.
        category: Category,
        /// The requested name.
        name: Option<String>,
        /// The fallback name that also missed.
        default: String,
        /// The node being bound when it happened.
        node: String,
    },
    /// A part was applied to a node whose name does not match.
    BindingMismatch {
        /// Part name.
        part: String,
        /// Node name.
        node: String,
    },
    /// The node cannot carry the part's visuals.
    StructuralAnomaly {
        /// Part name.
        part: String,
        /// Node name.
        node: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl Diagnostic {
    /// Write the diagnostic to the log at its level.
    pub fn log(&self) {
        match self {
            Self::ResolutionMiss { .. } => log::error!("{}", self),
            Self::BindingMismatch { .. } | Self::StructuralAnomaly { .. } => {
                log::warn!("{}", self)
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResolutionMiss {
                category,
                name,
                default,
                node,
            } => write!(
                f,
                "no {} named '{}' (or default '{}') for node '{}'",
                category,
                name.as_deref().unwrap_or(""),
                default,
                node
            ),
            Self::BindingMismatch { part, node } => {
                write!(f, "part '{}' applied to node '{}' with a different name", part, node)
            }
            Self::StructuralAnomaly { part, node, reason } => {
                write!(f, "part '{}' on node '{}': {}", part, node, reason)
            }
        }
    }
}

/// Collected diagnostics. Every push is logged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and record a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        diagnostic.log();
        self.0.push(diagnostic);
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing went wrong.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in the order they were raised.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// Consume into a plain vector.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_message_names_both_lookups() {
        let d = Diagnostic::ResolutionMiss {
            category: Category::CoinSlot,
            name: Some("coin-slot-gold".into()),
            default: "coin-slot-small".into(),
            node: "coin-slot".into(),
        };
        assert_eq!(
            d.to_string(),
            "no coin slot named 'coin-slot-gold' (or default 'coin-slot-small') for node 'coin-slot'"
        );
    }

    #[test]
    fn push_records_in_order() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::BindingMismatch {
            part: "a".into(),
            node: "b".into(),
        });
        diags.push(Diagnostic::StructuralAnomaly {
            part: "a".into(),
            node: "a".into(),
            reason: "no mesh renderer".into(),
        });
        assert_eq!(diags.len(), 2);
        assert!(matches!(
            diags.iter().next(),
            Some(Diagnostic::BindingMismatch { .. })
        ));
    }
}
