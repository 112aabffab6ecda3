//! Advisory checks on a parsed description.

use std::collections::HashSet;
use std::fmt;

use crate::part::name_key;
use crate::Data;

/// A non-fatal problem found in a description.
///
/// None of these stop a cabinet from loading; callers log them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// No `name` key.
    MissingName,
    /// Neither `model.file` nor a style was given.
    MissingModel,
    /// Both a model file and a style are present; the file wins.
    ConflictingModel {
        /// The model file.
        file: String,
        /// The ignored style.
        style: String,
    },
    /// A part with a blank name; it can never match a node.
    EmptyPartName {
        /// Index in the parts list.
        index: usize,
    },
    /// A second part with the same name; only the first one binds.
    DuplicatePart {
        /// The duplicated name, as written on the later entry.
        name: String,
        /// Index of the later entry.
        index: usize,
    },
    /// `crt.orientation` is neither `horizontal` nor `vertical`.
    UnknownOrientation(String),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "cabinet has no name"),
            Self::MissingModel => write!(f, "no model file or style given"),
            Self::ConflictingModel { file, style } => write!(
                f,
                "both model file '{}' and style '{}' given, using the file",
                file, style
            ),
            Self::EmptyPartName { index } => write!(f, "part #{} has an empty name", index),
            Self::DuplicatePart { name, index } => write!(
                f,
                "part #{} '{}' repeats an earlier part and will be ignored",
                index, name
            ),
            Self::UnknownOrientation(o) => write!(f, "unknown crt orientation '{}'", o),
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

impl Data {
    /// Run the advisory checks, in document order.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if non_blank(self.name.as_deref()).is_none() {
            issues.push(ValidationIssue::MissingName);
        }

        let file = non_blank(self.model.as_ref().and_then(|m| m.file.as_deref()));
        let style = non_blank(self.model_style());
        match (file, style) {
            (None, None) => issues.push(ValidationIssue::MissingModel),
            (Some(file), Some(style)) => issues.push(ValidationIssue::ConflictingModel {
                file: file.to_string(),
                style: style.to_string(),
            }),
            _ => {}
        }

        if let Some(crt) = &self.crt {
            if let Some(o) = non_blank(crt.orientation.as_deref()) {
                if crt.orientation().is_none() {
                    issues.push(ValidationIssue::UnknownOrientation(o.to_string()));
                }
            }
        }

        let mut seen = HashSet::new();
        for (index, part) in self.parts.iter().enumerate() {
            let key = name_key(&part.name);
            if key.is_empty() {
                issues.push(ValidationIssue::EmptyPartName { index });
            } else if !seen.insert(key) {
                issues.push(ValidationIssue::DuplicatePart {
                    name: part.name.clone(),
                    index,
                });
            }
        }

        issues
    }
}
