//! Where cabinet files come from: a folder or a zip archive.

use std::fs::{self, File};
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::LoadError;

/// File name of the description inside a cabinet.
pub const DESCRIPTION_FILE: &str = "description.yaml";

/// Image extensions picked up as part art.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// A bundle of cabinet files.
pub trait CabinetSource {
    /// Human-readable location, for messages.
    fn label(&self) -> String;

    /// Every file path in the bundle.
    fn entries(&self) -> Vec<String>;

    /// Read a file by its path; `None` if it does not exist.
    fn read(&mut self, name: &str) -> Result<Option<Vec<u8>>, LoadError>;
}

/// Whether a path has one of the [`IMAGE_EXTENSIONS`], ignoring case.
pub fn is_image_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// The file name without directories or extension.
pub fn stem(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
}

/// A cabinet unpacked into a directory. Only the top level is used.
#[derive(Debug, Clone)]
pub struct FolderSource {
    root: PathBuf,
    entries: Vec<String>,
}

impl FolderSource {
    /// Open a folder and list its files.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let root = root.into();
        let mut entries = Vec::new();
        for entry in fs::read_dir(&root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    entries.push(name.to_string());
                }
            }
        }
        entries.sort();
        Ok(Self { root, entries })
    }
}

impl CabinetSource for FolderSource {
    fn label(&self) -> String {
        self.root.display().to_string()
    }

    fn entries(&self) -> Vec<String> {
        self.entries.clone()
    }

    fn read(&mut self, name: &str) -> Result<Option<Vec<u8>>, LoadError> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(fs::read(path)?))
    }
}

/// A cabinet packed in a zip archive. Entries may sit in subdirectories.
pub struct ZipSource<R: Read + Seek> {
    label: String,
    archive: ZipArchive<R>,
}

impl ZipSource<BufReader<File>> {
    /// Open a zip file on disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = BufReader::new(File::open(path)?);
        Self::from_reader(path.display().to_string(), file)
    }
}

impl<R: Read + Seek> ZipSource<R> {
    /// Read an archive from any seekable reader.
    pub fn from_reader(label: impl Into<String>, reader: R) -> Result<Self, LoadError> {
        Ok(Self {
            label: label.into(),
            archive: ZipArchive::new(reader)?,
        })
    }
}

impl<R: Read + Seek> CabinetSource for ZipSource<R> {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn entries(&self) -> Vec<String> {
        self.archive
            .file_names()
            .filter(|n| !n.ends_with('/'))
            .map(str::to_string)
            .collect()
    }

    fn read(&mut self, name: &str) -> Result<Option<Vec<u8>>, LoadError> {
        let mut file = match self.archive.by_name(name) {
            Ok(f) => f,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;
        Ok(Some(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn image_names() {
        assert!(is_image_name("left.PNG"));
        assert!(is_image_name("art/marquee.jpeg"));
        assert!(!is_image_name("description.yaml"));
        assert!(!is_image_name("png"));
        assert_eq!(stem("art/Left.png"), "Left");
    }

    #[test]
    fn zip_reads_entries() {
        let bytes = fixtures::zip(&[("description.yaml", b"name: z\n"), ("art/left.png", b"x")]);
        let mut src = ZipSource::from_reader("mem", std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(src.entries(), vec!["description.yaml", "art/left.png"]);
        assert_eq!(src.read("description.yaml").unwrap().unwrap(), b"name: z\n");
        assert!(src.read("missing.glb").unwrap().is_none());
    }

    #[test]
    fn folder_lists_top_level_files() {
        let dir = fixtures::temp_dir("folder_lists_top_level_files");
        fs::write(dir.join("description.yaml"), "name: f\n").unwrap();
        fs::write(dir.join("b.png"), [0u8]).unwrap();
        fs::create_dir(dir.join("nested")).unwrap();
        let mut src = FolderSource::open(&dir).unwrap();
        assert_eq!(src.entries(), vec!["b.png", "description.yaml"]);
        assert_eq!(src.read("description.yaml").unwrap().unwrap(), b"name: f\n");
        assert!(src.read("nested").unwrap().is_none());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn not_a_zip() {
        let err = ZipSource::from_reader("mem", std::io::Cursor::new(b"plain".to_vec()));
        assert!(matches!(err, Err(LoadError::Zip(_))));
    }
}
