//! End-to-end tests: scene file on disk through to rendered geometry.

use std::io::Write;
use std::path::Path;

use ace_layout::{Offset, Size};
use ace_layout_harness::{Args, render, run};
use tempfile::NamedTempFile;

const STACK_SCENE: &str = r#"{
    "viewport": { "width": 1080, "height": 2244 },
    "root": {
        "type": "stack",
        "alignment": "center",
        "children": [
            { "type": "box", "width": 100, "height": 100 },
            { "type": "box", "width": 200, "height": 200 },
            { "type": "box", "width": 300, "height": 300 }
        ]
    }
}"#;

fn scene_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp scene");
    file.write_all(json.as_bytes()).expect("write temp scene");
    file
}

fn args(path: &Path, twice: bool) -> Args {
    Args {
        scene: path.to_path_buf(),
        twice,
        compact: false,
    }
}

#[test]
fn test_stack_scene_from_file() {
    let file = scene_file(STACK_SCENE);
    let dump = run(&args(file.path(), true)).unwrap();

    assert_eq!(dump.nodes.len(), 4);
    assert_eq!(dump.nodes[0].size, Size::new(300.0, 300.0));
    assert_eq!(dump.nodes[1].position, Offset::new(100.0, 100.0));
    assert_eq!(dump.nodes[2].position, Offset::new(50.0, 50.0));
    assert_eq!(dump.nodes[3].position, Offset::new(0.0, 0.0));
}

#[test]
fn test_render_is_json() {
    let file = scene_file(STACK_SCENE);
    let dump = run(&args(file.path(), false)).unwrap();
    let text = render(&dump, true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["nodes"][0]["kind"], "stack");
    assert!(!text.contains('\n'));
}

#[test]
fn test_missing_file_reports_path() {
    let err = run(&args(Path::new("/nonexistent/scene.json"), false)).unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/scene.json"));
}

#[test]
fn test_malformed_scene_is_an_error() {
    let file = scene_file("{ \"viewport\": { \"width\": 10 } }");
    let err = run(&args(file.path(), false)).unwrap_err();
    assert!(format!("{err:#}").contains("parsing scene"));
}
