#![warn(missing_docs)]

//! Binding engine for cabinet skins.
//!
//! Takes a parsed description ([`cabview_ir::Data`]), an imported model in
//! any [`cabview_scene::SceneGraph`], the cabinet's images and a
//! [`ResourceResolver`], and turns the raw model into a styled cabinet:
//!
//! - placeholders (`coin-slot`, `screen-mock-*`) are replaced by resolved
//!   prefabs or dropped
//! - nodes are matched to parts by trimmed, case-insensitive name
//! - each matched node gets a material built by the part pipeline
//!
//! The result is a [`Binding`] from part names to nodes, plus
//! [`CabinetMetrics`] and the diagnostics collected on the way.

mod binder;
mod binding;
mod error;
mod images;
mod library;
pub mod pipeline;
mod resolver;

pub use binder::{BindResult, Binder, CabinetMetrics, COIN_SLOT_PLACEHOLDER};
pub use binding::{Binding, BoundPart};
pub use error::{BindError, Diagnostic, Diagnostics};
pub use images::ImageSet;
pub use library::AssetLibrary;
pub use pipeline::{apply_part, RENDER_QUEUE_BLOCKER, RENDER_QUEUE_OVERLAY};
pub use resolver::{Asset, Category, ResourceResolver};
