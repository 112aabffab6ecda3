//! Screen / CRT configuration.

use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;
use crate::lenient;
use crate::part::names_match;

/// Screen orientation of the cabinet's monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Landscape monitor.
    Horizontal,
    /// Portrait monitor.
    Vertical,
}

impl Orientation {
    /// Parse `horizontal` / `vertical`, ignoring case and padding.
    pub fn parse(s: &str) -> Option<Self> {
        if names_match(s, "horizontal") {
            Some(Self::Horizontal)
        } else if names_match(s, "vertical") {
            Some(Self::Vertical)
        } else {
            None
        }
    }

    /// The name of the placeholder node the model uses for this orientation.
    pub fn screen_mock_name(&self) -> &'static str {
        match self {
            Self::Horizontal => "screen-mock-horizontal",
            Self::Vertical => "screen-mock-vertical",
        }
    }
}

/// How the game image is shown on the screen.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Screen {
    /// CRT effect shader, `crt` when unset.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub shader: Option<String>,
    /// Wear level, usually `high`, `medium` or `low`.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub damage: Option<String>,
    /// Flip the game image along x.
    #[serde(default)]
    pub invertx: bool,
    /// Flip the game image along y.
    #[serde(default)]
    pub inverty: bool,
    /// Raw shader property strings, passed through untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
}

fn default_gamma() -> f32 {
    0.5
}

/// The CRT block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crt {
    /// Screen variant, the 19 inch CRT when unset or unknown.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    /// `horizontal` or `vertical`.
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub orientation: Option<String>,
    /// Screen presentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<Screen>,
    /// Adjustment applied to the substituted screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    /// Gamma of the game palette.
    #[serde(default = "default_gamma")]
    pub gamma: f32,
    /// Brightness adjustment.
    #[serde(default)]
    pub brightness: f32,
}

impl Default for Crt {
    fn default() -> Self {
        Self {
            kind: None,
            orientation: None,
            screen: None,
            geometry: None,
            gamma: default_gamma(),
            brightness: 0.0,
        }
    }
}

impl Crt {
    /// Parsed orientation, `None` when missing or not recognized.
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation.as_deref().and_then(Orientation::parse)
    }
}
