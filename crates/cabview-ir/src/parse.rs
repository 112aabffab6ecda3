//! YAML reader and writer for `description.yaml`.

use serde_yaml::Value;

use crate::error::ParseError;
use crate::Data;

/// Parse a description document.
///
/// Unknown keys are ignored at every level and missing sections are left
/// empty. Only broken syntax, a non-mapping document, or a known key with
/// a value of the wrong shape are errors. A document without a `name` still
/// parses; see [`Data::validate`].
///
/// Fields are read from the text itself, not from a parsed [`Value`], so
/// string fields keep number-like scalars such as `1.10` exactly as written.
pub fn parse(text: &str) -> Result<Data, ParseError> {
    let value: Value = serde_yaml::from_str(text).map_err(ParseError::syntax)?;

    let data = if value.is_null() {
        Data::default()
    } else if value.is_mapping() {
        serde_yaml::from_str(text).map_err(|e| ParseError::Field(e.to_string()))?
    } else {
        return Err(ParseError::NotADocument(kind_name(&value)));
    };

    log::info!(
        "Description loaded: {} ({} parts)",
        data.name.as_deref().unwrap_or("<unnamed>"),
        data.parts.len()
    );
    Ok(data)
}

/// Write a description back to YAML. Only recognized fields survive.
pub fn to_yaml(data: &Data) -> Result<String, ParseError> {
    serde_yaml::to_string(data).map_err(|e| ParseError::Serialize(e.to_string()))
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorData, PartType};

    const GALAGA: &str = r#"
name: galaga
game: Galaga
year: 1981
author: someone
version: 1.0
material: black
model:
  file: galaga.glb
coinslot: coin-slot-double
coinslotgeometry:
  rotation: { y: 90 }
  scalepercentage: 80
crt:
  type: 19i
  orientation: vertical
  screen:
    shader: crt
    damage: low
    properties:
      - "curvature=0.1"
  geometry:
    rotation: { x: -10 }
  gamma: 0.6
parts:
  - name: bezel
    type: bezel
  - name: marquee
    type: marquee
    marquee:
      illumination-type: two-tubes
      color: { r: 255, g: 200, b: 200, intensity: 2 }
  - name: left
    type: Sideart
    art:
      file: left.png
      invertx: true
    material-properties:
      metallic: 0.3
      emission-color: { r: 0 }
  - name: joystick
    color: { r: 10, g: 10, b: 10 }
    normal: brushed
"#;

    #[test]
    fn parse_full_document() {
        let data = parse(GALAGA).expect("parse");
        assert_eq!(data.name.as_deref(), Some("galaga"));
        assert_eq!(data.year, Some(1981));
        assert_eq!(data.version.as_deref(), Some("1.0"));
        assert_eq!(data.model.as_ref().and_then(|m| m.file.as_deref()), Some("galaga.glb"));
        assert_eq!(data.coinslot.as_deref(), Some("coin-slot-double"));
        let csg = data.coinslotgeometry.expect("coin slot geometry");
        assert_eq!(csg.rotation.y, 90.0);
        assert_eq!(csg.scalepercentage, 80);
        assert_eq!(csg.ratio.x, 1.0);

        let crt = data.crt.as_ref().expect("crt");
        assert_eq!(crt.kind.as_deref(), Some("19i"));
        assert_eq!(crt.gamma, 0.6);
        assert_eq!(crt.screen.as_ref().unwrap().properties, vec!["curvature=0.1"]);

        assert_eq!(data.parts.len(), 4);
        assert_eq!(data.parts[0].kind, PartType::Bezel);
        let marquee = data.parts[1].marquee.as_ref().unwrap();
        assert_eq!(marquee.illumination_type.as_deref(), Some("two-tubes"));
        assert_eq!(marquee.color.unwrap().intensity, Some(2));
        assert_eq!(data.parts[2].kind, PartType::Default);
        assert!(data.parts[2].art.as_ref().unwrap().invertx);
        let props = data.parts[2].material_properties.as_ref().unwrap();
        assert_eq!(props.metallic, 0.3);
        assert_eq!(props.smoothness, 0.5);
        assert_eq!(props.emission_color, Some(ColorData::rgb(0, 255, 255)));
        assert_eq!(data.parts[3].normal.as_deref(), Some("brushed"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let text = "name: x\nfuture-key: 3\nparts:\n  - name: a\n    sparkle: true\ncrt:\n  hologram: yes\n";
        let data = parse(text).expect("parse");
        assert_eq!(data.parts.len(), 1);
        assert!(data.crt.is_some());
    }

    #[test]
    fn underscore_keys_are_accepted() {
        let text = "parts:\n  - name: m\n    material_properties:\n      metallic: 1\n    marquee:\n      illumination_type: one-tube\n";
        let data = parse(text).expect("parse");
        let part = &data.parts[0];
        assert_eq!(part.material_properties.as_ref().unwrap().metallic, 1.0);
        assert_eq!(
            part.marquee.as_ref().unwrap().illumination_type.as_deref(),
            Some("one-tube")
        );
    }

    #[test]
    fn empty_document_is_not_an_error() {
        let data = parse("").expect("parse");
        assert!(data.name.is_none());
        assert!(data.parts.is_empty());
        assert!(data.crt.is_none());
    }

    #[test]
    fn missing_name_is_not_an_error() {
        let data = parse("year: 1982\n").expect("parse");
        assert!(data.name.is_none());
        assert_eq!(data.year, Some(1982));
    }

    #[test]
    fn broken_syntax_is_syntax_error() {
        let err = parse("name: [unclosed\nparts: -\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }), "{err}");
    }

    #[test]
    fn scalar_document_is_rejected() {
        let err = parse("just a string").unwrap_err();
        assert!(matches!(err, ParseError::NotADocument("a string")));
    }

    #[test]
    fn wrong_shape_is_field_error() {
        let err = parse("parts: 12\n").unwrap_err();
        assert!(matches!(err, ParseError::Field(_)), "{err}");
    }

    #[test]
    fn string_year_is_accepted() {
        let data = parse("year: \"1983\"\n").expect("parse");
        assert_eq!(data.year, Some(1983));
    }

    #[test]
    fn round_trip_keeps_recognized_fields() {
        let data = parse(GALAGA).expect("parse");
        let text = to_yaml(&data).expect("serialize");
        let again = parse(&text).expect("reparse");
        assert_eq!(data, again);
        assert!(text.contains("illumination-type"));
        assert!(text.contains("material-properties"));
    }

    #[test]
    fn float_like_strings_keep_their_text() {
        let data = parse("name: 1942\nversion: 1.10\nparts:\n  - name: 007\n").expect("parse");
        assert_eq!(data.name.as_deref(), Some("1942"));
        assert_eq!(data.version.as_deref(), Some("1.10"));
        assert_eq!(data.parts[0].name, "007");

        let again = parse(&to_yaml(&data).expect("serialize")).expect("reparse");
        assert_eq!(again.version.as_deref(), Some("1.10"));
        assert_eq!(again, data);
    }

    #[test]
    fn part_type_lists_and_maps_fall_back_to_default() {
        let data = parse("parts:\n  - name: a\n    type: [bezel]\n  - name: b\n    type: {kind: bezel}\n  - name: c\n    type: bezel\n")
            .expect("parse");
        assert_eq!(data.parts[0].kind, PartType::Default);
        assert_eq!(data.parts[1].kind, PartType::Default);
        assert_eq!(data.parts[2].kind, PartType::Bezel);
    }

    #[test]
    fn round_trip_drops_unknown_fields() {
        let data = parse("name: a\nsparkles: 9\n").expect("parse");
        let text = to_yaml(&data).expect("serialize");
        assert!(!text.contains("sparkles"));
    }
}
