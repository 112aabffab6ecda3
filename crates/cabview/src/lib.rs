#![warn(missing_docs)]

//! Arcade cabinet skin loader.
//!
//! A cabinet is a folder or zip holding a `description.yaml`, a glTF model
//! and optional part art. This crate reads the bundle, imports the model
//! into a [`cabview_scene::Scene`] and binds the description onto it with
//! [`cabview_bind::Binder`].
//!
//! # Example
//!
//! ```no_run
//! use cabview::{AssetLibrary, Viewer};
//!
//! let mut viewer = Viewer::new(AssetLibrary::builtin());
//! let cabinet = viewer.load_from_zip("galaga.zip")?;
//! println!("{}", cabinet.details());
//! # Ok::<(), cabview::LoadError>(())
//! ```

mod cabinet;
pub mod config;
mod error;
pub mod images;
pub mod import;
pub mod source;
mod viewer;

#[cfg(test)]
pub(crate) mod fixtures;

pub use cabinet::{Cabinet, CabinetDetails};
pub use config::LibraryManifest;
pub use error::LoadError;
pub use images::{decode_image, load_images};
pub use import::import_glb;
pub use source::{CabinetSource, FolderSource, ZipSource, DESCRIPTION_FILE};
pub use viewer::Viewer;

pub use cabview_bind::{AssetLibrary, Binding, CabinetMetrics, Category, Diagnostic};
pub use cabview_ir::Data;
