//! Single-cabinet viewer state.

use std::path::Path;

use cabview_bind::ResourceResolver;

use crate::cabinet::Cabinet;
use crate::error::LoadError;
use crate::source::{CabinetSource, FolderSource, ZipSource};

/// Holds at most one loaded cabinet.
///
/// Loading a new cabinet drops the current one first, so two scenes are
/// never alive at once. A failed load leaves the viewer empty.
pub struct Viewer<R: ResourceResolver> {
    library: R,
    current: Option<Cabinet>,
}

impl<R: ResourceResolver> Viewer<R> {
    /// An empty viewer resolving assets through `library`.
    pub fn new(library: R) -> Self {
        Self {
            library,
            current: None,
        }
    }

    /// The asset library.
    pub fn library(&self) -> &R {
        &self.library
    }

    /// The loaded cabinet, if any.
    pub fn current(&self) -> Option<&Cabinet> {
        self.current.as_ref()
    }

    /// Mutable access to the loaded cabinet.
    pub fn current_mut(&mut self) -> Option<&mut Cabinet> {
        self.current.as_mut()
    }

    /// Load an unpacked cabinet folder.
    pub fn load_from_folder(&mut self, path: impl AsRef<Path>) -> Result<&Cabinet, LoadError> {
        self.unload();
        let mut source = FolderSource::open(path.as_ref())?;
        self.load(&mut source)
    }

    /// Load a zipped cabinet.
    pub fn load_from_zip(&mut self, path: impl AsRef<Path>) -> Result<&Cabinet, LoadError> {
        self.unload();
        let mut source = ZipSource::open(path)?;
        self.load(&mut source)
    }

    /// Load from any source.
    pub fn load<S: CabinetSource + ?Sized>(&mut self, source: &mut S) -> Result<&Cabinet, LoadError> {
        self.unload();
        let cabinet = Cabinet::load(source, &self.library)?;
        let cabinet: &Cabinet = self.current.insert(cabinet);
        Ok(cabinet)
    }

    /// Drop the current cabinet and its scene.
    pub fn unload(&mut self) {
        if let Some(old) = self.current.take() {
            log::info!("Unloading cabinet '{}'", old.name());
        }
    }

    /// Show or hide the current cabinet's blockers. Returns how many nodes
    /// changed; zero without a cabinet.
    pub fn toggle_blockers(&mut self, force: Option<bool>) -> usize {
        let Some(cabinet) = self.current.as_mut() else {
            return 0;
        };
        match cabinet.toggle_blockers(force) {
            Ok(n) => n,
            Err(e) => {
                log::warn!("Could not toggle blockers: {}", e);
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use cabview_bind::AssetLibrary;
    use std::io::Cursor;

    fn cabinet_zip(name: &str, parts: &[&str]) -> Vec<u8> {
        let mut yaml = format!("name: {}\nmodel:\n  file: cab.glb\nparts:\n", name);
        for p in parts {
            yaml.push_str(&format!("  - name: {}\n    type: blocker\n", p));
        }
        let glb = fixtures::glb(parts);
        fixtures::zip(&[("description.yaml", yaml.as_bytes()), ("cab.glb", &glb)])
    }

    fn source(bytes: Vec<u8>) -> ZipSource<Cursor<Vec<u8>>> {
        ZipSource::from_reader("mem", Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn second_load_replaces_first() {
        let mut viewer = Viewer::new(AssetLibrary::builtin());
        assert!(viewer.current().is_none());

        viewer.load(&mut source(cabinet_zip("one", &["a"]))).unwrap();
        assert_eq!(viewer.current().unwrap().name(), "one");

        viewer.load(&mut source(cabinet_zip("two", &["a", "b"]))).unwrap();
        let cab = viewer.current().unwrap();
        assert_eq!(cab.name(), "two");
        assert_eq!(cab.binding.len(), 2);
    }

    #[test]
    fn failed_load_leaves_viewer_empty() {
        let mut viewer = Viewer::new(AssetLibrary::builtin());
        viewer.load(&mut source(cabinet_zip("one", &["a"]))).unwrap();
        let bad = fixtures::zip(&[("readme.txt", b"no description")]);
        assert!(viewer.load(&mut source(bad)).is_err());
        assert!(viewer.current().is_none());
    }

    #[test]
    fn toggle_blockers_on_current() {
        let mut viewer = Viewer::new(AssetLibrary::builtin());
        assert_eq!(viewer.toggle_blockers(None), 0);
        viewer.load(&mut source(cabinet_zip("one", &["a", "b"]))).unwrap();
        assert_eq!(viewer.toggle_blockers(Some(false)), 2);
    }

    #[test]
    fn load_from_zip_file() {
        let dir = fixtures::temp_dir("load_from_zip_file");
        let path = dir.join("one.zip");
        std::fs::write(&path, cabinet_zip("one", &["a"])).unwrap();
        let mut viewer = Viewer::new(AssetLibrary::builtin());
        assert_eq!(viewer.load_from_zip(&path).unwrap().name(), "one");
        assert!(viewer.load_from_folder(dir.join("missing")).is_err());
        assert!(viewer.current().is_none());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
