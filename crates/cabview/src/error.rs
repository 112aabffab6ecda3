//! Error types for cabinet loading.

use cabview_bind::BindError;
use cabview_ir::ParseError;
use cabview_scene::SceneError;
use thiserror::Error;

/// Errors that can occur while loading a cabinet.
#[derive(Error, Debug)]
pub enum LoadError {
    /// An I/O error occurred reading the cabinet.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive is not a readable zip file.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// `description.yaml` could not be parsed.
    #[error("Description error: {0}")]
    Parse(#[from] ParseError),

    /// The cabinet has no `description.yaml`.
    #[error("No description.yaml found in {0}")]
    MissingDescription(String),

    /// The description names no model file, or the file is not in the
    /// cabinet.
    #[error("{}", missing_model_message(.0.as_deref()))]
    MissingModel(Option<String>),

    /// The description asks for a built-in cabinet shape.
    #[error("Built-in cabinet style '{0}' is not supported, the cabinet needs a model file")]
    UnsupportedStyle(String),

    /// The model file is not valid glTF.
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    /// An image could not be decoded.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// The asset library manifest is not valid TOML.
    #[error("Manifest error: {0}")]
    Manifest(#[from] toml::de::Error),

    /// A manifest entry is inconsistent.
    #[error("Invalid manifest entry '{name}': {reason}")]
    ManifestEntry {
        /// Entry name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The imported scene could not be built.
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Binding failed.
    #[error("Bind error: {0}")]
    Bind(#[from] BindError),
}

fn missing_model_message(file: Option<&str>) -> String {
    match file {
        Some(f) => format!("Model file '{}' not found in cabinet", f),
        None => "Description names no model file".to_string(),
    }
}

impl LoadError {
    /// Create a manifest entry error.
    pub fn manifest_entry(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ManifestEntry {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
