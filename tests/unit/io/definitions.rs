//! Tests for reading and writing tile definition files

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile::TempDir;
    use wavetile::io::definitions::{load_definitions, parse_definitions, save_definitions};
    use wavetile::{EdgeTag, Rotation, TileDefinition, WfcError};

    // Tests the wrapped form with mixed tags, transforms and defaults
    // Verified by ignoring the reflectX alias
    #[test]
    fn test_parse_wrapped_document() {
        let text = r#"{
            "tiles": [
                {
                    "name": "road",
                    "content": "road.png",
                    "top": ["grass", 1, "grass"],
                    "right": ["grass"],
                    "bottom": ["grass", 1, "grass"],
                    "left": ["grass"],
                    "rotations": [90, 270],
                    "reflectX": true
                },
                { "name": "grass", "weight": 3 }
            ]
        }"#;

        let definitions = parse_definitions(text).expect("Failed to parse definitions");
        let [road, grass] = definitions.as_slice() else {
            unreachable!("Expected two definitions, got {}", definitions.len());
        };

        assert_eq!(road.content, "road.png");
        assert!((road.weight - 10.0).abs() < f64::EPSILON);
        assert_eq!(
            road.top,
            vec![EdgeTag::from("grass"), EdgeTag::from(1_i64), EdgeTag::from("grass")]
        );
        assert_eq!(road.rotations, vec![Rotation::Quarter, Rotation::ThreeQuarter]);
        assert!(road.reflect_x);
        assert!(!road.reflect_y);

        assert!((grass.weight - 3.0).abs() < f64::EPSILON);
        assert!(grass.left.is_empty());
    }

    // Tests a bare array is accepted
    // Verified by only accepting the wrapped form
    #[test]
    fn test_parse_bare_array() {
        let definitions =
            parse_definitions(r#"[{ "name": "a" }, { "name": "b" }]"#).expect("Failed to parse");
        let names: Vec<&str> = definitions.iter().map(|tile| tile.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    // Tests fractional numeric tags are accepted alongside integers and text
    // Verified by restricting numeric tags to integers
    #[test]
    fn test_parse_fractional_tags() {
        let text = r#"[{
            "name": "a",
            "top": [0.5, "x", 2],
            "right": [1.25],
            "bottom": [2, "x", 0.5],
            "left": [1.25]
        }]"#;

        let definitions = parse_definitions(text).expect("Failed to parse definitions");
        let [tile] = definitions.as_slice() else {
            unreachable!("Expected one definition, got {}", definitions.len());
        };
        assert_eq!(
            tile.top,
            vec![EdgeTag::from(0.5), EdgeTag::from("x"), EdgeTag::from(2_i64)]
        );
        assert_eq!(tile.right, vec![EdgeTag::from(1.25)]);
        assert!(matches!(tile.right.first(), Some(EdgeTag::Float(_))));
    }

    // Tests unsupported rotation angles are parse errors
    // Verified by mapping unknown angles to no rotation
    #[test]
    fn test_parse_rejects_bad_rotation() {
        let result = parse_definitions(r#"[{ "name": "a", "rotations": [45] }]"#);
        assert!(matches!(result, Err(WfcError::DefinitionParse { .. })));
    }

    // Tests saved definitions load back unchanged
    // Verified by skipping edge tags during save
    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("tiles.json");
        let definitions = vec![
            TileDefinition::uniform("a", &[EdgeTag::from("x"), EdgeTag::from(2_i64)])
                .with_weight(4.0)
                .with_rotations(&[Rotation::Half])
                .with_reflections(false, true),
        ];

        save_definitions(&path, &definitions).expect("Failed to save");
        let written = fs::read_to_string(&path).expect("Failed to read back");
        assert!(written.contains("\"tiles\""));

        let loaded = load_definitions(&path).expect("Failed to load");
        assert_eq!(loaded, definitions);
    }

    // Tests missing files and malformed content report the path
    // Verified by returning an empty list for missing files
    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            load_definitions(&missing),
            Err(WfcError::FileSystem { .. })
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").expect("Failed to write");
        match load_definitions(&broken) {
            Err(WfcError::DefinitionParse { path, .. }) => assert_eq!(path, broken),
            other => unreachable!("Expected DefinitionParse error, got {other:?}"),
        }
    }
}
