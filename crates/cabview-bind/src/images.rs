//! Decoded cabinet images, matched to parts by name.

use cabview_ir::names_match;
use cabview_scene::Texture;

/// Images shipped with a cabinet, keyed by file name without extension.
///
/// A part named `left` picks up `left.png` (or `Left.JPG`).
#[derive(Debug, Clone, Default)]
pub struct ImageSet {
    textures: Vec<Texture>,
}

impl ImageSet {
    /// No images.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a texture. Its `name` is the match key. A later texture with the
    /// same name does not shadow an earlier one.
    pub fn insert(&mut self, texture: Texture) {
        self.textures.push(texture);
    }

    /// The image for a part, if any.
    pub fn texture_for(&self, part_name: &str) -> Option<&Texture> {
        self.textures.iter().find(|t| names_match(&t.name, part_name))
    }

    /// Number of images.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// True without images.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Image names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.textures.iter().map(|t| t.name.as_str())
    }
}

impl FromIterator<Texture> for ImageSet {
    fn from_iter<I: IntoIterator<Item = Texture>>(iter: I) -> Self {
        Self {
            textures: iter.into_iter().collect(),
        }
    }
}
