//! A loaded, bound cabinet.

use std::fmt;

use cabview_bind::{Binder, Binding, CabinetMetrics, Diagnostic, ResourceResolver};
use cabview_ir::{Data, ModelSource};
use cabview_scene::{NodeId, Scene, SceneError};

use crate::error::LoadError;
use crate::images::load_images;
use crate::import::import_glb;
use crate::source::{CabinetSource, DESCRIPTION_FILE};

/// Name used when the description has none.
const UNNAMED: &str = "unnamed";

/// A cabinet: its description, the imported and bound model, and what the
/// binder reported.
#[derive(Debug, Clone)]
pub struct Cabinet {
    /// The parsed description.
    pub data: Data,
    /// The imported model, after binding.
    pub scene: Scene,
    /// The model root (`Cab: <name>`).
    pub root: NodeId,
    /// Node per bound part.
    pub binding: Binding,
    /// Size figures after binding.
    pub metrics: CabinetMetrics,
    /// Non-fatal binding problems.
    pub diagnostics: Vec<Diagnostic>,
}

impl Cabinet {
    /// Load a cabinet from `source`, resolving assets through `library`.
    ///
    /// Reads `description.yaml`, decodes the images, imports the model named
    /// by `model.file` and binds the description onto it.
    pub fn load<S, R>(source: &mut S, library: &R) -> Result<Self, LoadError>
    where
        S: CabinetSource + ?Sized,
        R: ResourceResolver + ?Sized,
    {
        let label = source.label();
        log::info!("Loading cabinet from {}", label);

        let text = source
            .read(DESCRIPTION_FILE)?
            .ok_or_else(|| LoadError::MissingDescription(label.clone()))?;
        let data = Data::from_yaml(&String::from_utf8_lossy(&text))?;
        for issue in data.validate() {
            log::warn!("{}: {}", label, issue);
        }

        let images = load_images(source);

        let file = match data.model_source() {
            Some(ModelSource::File(file)) => file.to_string(),
            Some(ModelSource::Style(style)) => {
                return Err(LoadError::UnsupportedStyle(style.to_string()))
            }
            None => return Err(LoadError::MissingModel(None)),
        };
        let model = source
            .read(&file)?
            .ok_or_else(|| LoadError::MissingModel(Some(file.clone())))?;

        let name = data.name.as_deref().unwrap_or(UNNAMED);
        let (mut scene, root) = import_glb(&model, name)?;

        let result =
            Binder::for_cabinet(&data, library).bind(&data, &mut scene, Some(root), &images)?;

        log::info!(
            "Cabinet '{}' ready: {} parts bound, {} diagnostics",
            name,
            result.binding.len(),
            result.diagnostics.len()
        );
        Ok(Self {
            data,
            scene,
            root,
            binding: result.binding,
            metrics: result.metrics,
            diagnostics: result.diagnostics.into_vec(),
        })
    }

    /// The cabinet name, or `unnamed`.
    pub fn name(&self) -> &str {
        self.data.name.as_deref().unwrap_or(UNNAMED)
    }

    /// Show or hide the blocker parts; see [`Binding::toggle_blockers`].
    pub fn toggle_blockers(&mut self, force: Option<bool>) -> Result<usize, SceneError> {
        self.binding.toggle_blockers(&mut self.scene, force)
    }

    /// The summary shown in the details panel.
    pub fn details(&self) -> CabinetDetails {
        let d = &self.data;
        let roms = d.roms_or_rom();
        CabinetDetails {
            name: self.name().to_string(),
            game: d.game.clone(),
            year: d.year,
            author: d.author.clone(),
            comments: d.comments.clone(),
            rom: (!roms.is_empty()).then(|| roms.join(", ")),
            timetoload: d.timetoload,
            md5sum: d.md5sum.clone(),
            material: d.material_name().map(str::to_string),
            space: d.space.clone(),
            parts: d.part_count(),
            bound: self.binding.len(),
            vertices: self.metrics.vertices,
            materials: self.metrics.materials,
        }
    }
}

/// Description fields and metrics of a loaded cabinet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CabinetDetails {
    /// Cabinet name.
    pub name: String,
    /// Game title.
    pub game: Option<String>,
    /// Release year.
    pub year: Option<i32>,
    /// Cabinet author.
    pub author: Option<String>,
    /// Free text.
    pub comments: Option<String>,
    /// ROM or ROM playlist.
    pub rom: Option<String>,
    /// Seconds the emulator needs to start.
    pub timetoload: Option<i32>,
    /// ROM checksum.
    pub md5sum: Option<String>,
    /// Cabinet-wide material.
    pub material: Option<String>,
    /// Space the cabinet belongs to.
    pub space: Option<String>,
    /// Parts in the description.
    pub parts: usize,
    /// Parts bound to a node.
    pub bound: usize,
    /// Vertices in the model.
    pub vertices: usize,
    /// Distinct materials in the model.
    pub materials: usize,
}

impl fmt::Display for CabinetDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name:       {}", self.name)?;
        let fields = [
            ("Game", self.game.clone()),
            ("Year", self.year.map(|y| y.to_string())),
            ("Author", self.author.clone()),
            ("ROM", self.rom.clone()),
            ("Load time", self.timetoload.map(|t| format!("{}s", t))),
            ("MD5", self.md5sum.clone()),
            ("Material", self.material.clone()),
            ("Space", self.space.clone()),
            ("Comments", self.comments.clone()),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                writeln!(f, "{:<11} {}", format!("{}:", label), value)?;
            }
        }
        writeln!(f, "Parts:      {} ({} bound)", self.parts, self.bound)?;
        writeln!(f, "Vertices:   {}", self.vertices)?;
        write!(f, "Materials:  {}", self.materials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::source::{FolderSource, ZipSource};
    use cabview_bind::AssetLibrary;
    use cabview_ir::PartType;
    use cabview_scene::{param, SceneGraph};
    use std::io::Cursor;

    const DESCRIPTION: &str = "\
name: galaga
game: Galaga
year: 1981
rom: galaga.zip
model:
  file: galaga.glb
crt:
  orientation: vertical
parts:
  - name: left
  - name: Blocker
    type: blocker
  - name: marquee
    type: marquee
";

    fn galaga_zip() -> Vec<u8> {
        let glb = fixtures::glb(&["left", "right", "blocker", "marquee", "coin-slot"]);
        let png = fixtures::png(2, 2, [10, 20, 30, 255]);
        fixtures::zip(&[
            ("description.yaml", DESCRIPTION.as_bytes()),
            ("galaga.glb", &glb),
            ("images/left.png", &png),
        ])
    }

    fn zip_source(bytes: Vec<u8>) -> ZipSource<Cursor<Vec<u8>>> {
        ZipSource::from_reader("galaga.zip", Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn loads_and_binds_zip() {
        let mut src = zip_source(galaga_zip());
        let cab = Cabinet::load(&mut src, &AssetLibrary::builtin()).unwrap();

        assert_eq!(cab.name(), "galaga");
        assert_eq!(cab.scene.name(cab.root), Some("Cab: galaga"));
        assert_eq!(cab.binding.len(), 3);
        assert_eq!(cab.binding.get("blocker").unwrap().kind, PartType::Blocker);

        let left = cab.binding.node_for("left").unwrap();
        let material = cab
            .scene
            .material(cab.scene.primary_material(left).unwrap())
            .unwrap();
        let art = material.texture(param::BASE_MAP).unwrap();
        assert_eq!((art.width, art.height), (2, 2));

        // The coin slot placeholder was swapped for the stock prefab.
        let names: Vec<_> = cab
            .scene
            .children(cab.root)
            .into_iter()
            .filter_map(|c| cab.scene.name(c).map(str::to_string))
            .collect();
        assert!(names.iter().any(|n| n == "coin-slot-small"));
        assert!(!names.iter().any(|n| n == "coin-slot"));
        assert!(cab.metrics.vertices > 12);
    }

    #[test]
    fn loads_folder() {
        let dir = fixtures::temp_dir("loads_folder");
        std::fs::write(dir.join("description.yaml"), DESCRIPTION).unwrap();
        std::fs::write(dir.join("galaga.glb"), fixtures::glb(&["left"])).unwrap();
        std::fs::write(dir.join("left.png"), fixtures::png(1, 1, [0, 0, 0, 255])).unwrap();

        let mut src = FolderSource::open(&dir).unwrap();
        let cab = Cabinet::load(&mut src, &AssetLibrary::builtin()).unwrap();
        assert_eq!(cab.binding.len(), 1);
        assert!(cab.binding.node_for("LEFT").is_some());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn toggles_blockers() {
        let mut src = zip_source(galaga_zip());
        let mut cab = Cabinet::load(&mut src, &AssetLibrary::builtin()).unwrap();
        let blocker = cab.binding.node_for("blocker").unwrap();
        assert!(cab.scene.is_active(blocker));
        assert_eq!(cab.toggle_blockers(None).unwrap(), 1);
        assert!(!cab.scene.is_active(blocker));
        cab.toggle_blockers(Some(true)).unwrap();
        assert!(cab.scene.is_active(blocker));
    }

    #[test]
    fn details_panel() {
        let mut src = zip_source(galaga_zip());
        let cab = Cabinet::load(&mut src, &AssetLibrary::builtin()).unwrap();
        let details = cab.details();
        assert_eq!(details.game.as_deref(), Some("Galaga"));
        assert_eq!(details.rom.as_deref(), Some("galaga.zip"));
        assert_eq!(details.parts, 3);
        assert_eq!(details.bound, 3);

        let text = details.to_string();
        assert!(text.contains("Name:       galaga"));
        assert!(text.contains("Year:       1981"));
        assert!(!text.contains("Author"));
        assert!(text.ends_with(&format!("Materials:  {}", details.materials)));
    }

    #[test]
    fn missing_description() {
        let mut src = zip_source(fixtures::zip(&[("galaga.glb", b"")]));
        assert!(matches!(
            Cabinet::load(&mut src, &AssetLibrary::builtin()),
            Err(LoadError::MissingDescription(label)) if label == "galaga.zip"
        ));
    }

    #[test]
    fn model_file_not_in_bundle() {
        let mut src = zip_source(fixtures::zip(&[("description.yaml", DESCRIPTION.as_bytes())]));
        assert!(matches!(
            Cabinet::load(&mut src, &AssetLibrary::builtin()),
            Err(LoadError::MissingModel(Some(f))) if f == "galaga.glb"
        ));
    }

    #[test]
    fn no_model_at_all() {
        let mut src = zip_source(fixtures::zip(&[("description.yaml", b"name: x\n")]));
        assert!(matches!(
            Cabinet::load(&mut src, &AssetLibrary::builtin()),
            Err(LoadError::MissingModel(None))
        ));
    }

    #[test]
    fn style_only_is_unsupported() {
        let yaml = b"name: x\nmodel:\n  style: galaga\n";
        let mut src = zip_source(fixtures::zip(&[("description.yaml", yaml)]));
        assert!(matches!(
            Cabinet::load(&mut src, &AssetLibrary::builtin()),
            Err(LoadError::UnsupportedStyle(s)) if s == "galaga"
        ));
    }

    #[test]
    fn bad_description_is_a_parse_error() {
        let mut src = zip_source(fixtures::zip(&[("description.yaml", b"- just\n- a list\n")]));
        assert!(matches!(
            Cabinet::load(&mut src, &AssetLibrary::builtin()),
            Err(LoadError::Parse(_))
        ));
    }
}
