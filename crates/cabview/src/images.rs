//! Decoding part art.

use cabview_bind::ImageSet;
use cabview_scene::Texture;

use crate::error::LoadError;
use crate::source::{is_image_name, stem, CabinetSource};

/// Decode an image file into an RGBA8 texture named after its file stem.
pub fn decode_image(name: &str, bytes: &[u8]) -> Result<Texture, LoadError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Texture::new(stem(name), width, height, rgba.into_raw()))
}

/// Decode every image in `source`, in entry order.
///
/// Files that fail to read or decode are logged and skipped.
pub fn load_images<S: CabinetSource + ?Sized>(source: &mut S) -> ImageSet {
    let mut images = ImageSet::new();
    for entry in source.entries() {
        if !is_image_name(&entry) {
            continue;
        }
        let decoded = source
            .read(&entry)
            .and_then(|bytes| match bytes {
                Some(b) => decode_image(&entry, &b).map(Some),
                None => Ok(None),
            });
        match decoded {
            Ok(Some(texture)) => {
                log::debug!(
                    "Loaded image '{}' ({}x{})",
                    texture.name,
                    texture.width,
                    texture.height
                );
                images.insert(texture);
            }
            Ok(None) => {}
            Err(e) => log::warn!("Skipping image '{}': {}", entry, e),
        }
    }
    log::info!("Loaded {} images from {}", images.len(), source.label());
    images
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::source::ZipSource;
    use std::io::Cursor;

    #[test]
    fn decode_png() {
        let png = fixtures::png(2, 3, [255, 0, 0, 255]);
        let tex = decode_image("art/Left.png", &png).unwrap();
        assert_eq!(tex.name, "Left");
        assert_eq!((tex.width, tex.height), (2, 3));
        assert_eq!(tex.pixels.len(), 2 * 3 * 4);
        assert_eq!(&tex.pixels[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn decode_garbage_fails() {
        assert!(matches!(
            decode_image("x.png", b"not an image"),
            Err(LoadError::Image(_))
        ));
    }

    #[test]
    fn load_skips_bad_and_non_images() {
        let png = fixtures::png(1, 1, [0, 0, 255, 255]);
        let bytes = fixtures::zip(&[
            ("description.yaml", b"name: t\n"),
            ("art/left.png", &png),
            ("broken.jpg", b"nope"),
            ("readme.txt", b"hi"),
        ]);
        let mut src = ZipSource::from_reader("mem", Cursor::new(bytes)).unwrap();
        let images = load_images(&mut src);
        assert_eq!(images.len(), 1);
        assert!(images.texture_for("LEFT").is_some());
    }
}
