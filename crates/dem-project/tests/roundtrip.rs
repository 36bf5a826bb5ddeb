use std::path::PathBuf;

use dem_project::*;

#[test]
fn roundtrip_yaml_pipeline() {
    let pipeline = Pipeline {
        version: 1,
        name: "n39e035".to_string(),
        input: InputDef {
            path: PathBuf::from("/data/N39E035.hgt"),
            format: RasterFormatDef::Hgt,
        },
        build: BuildDef {
            size_cap: Some(SizeCapDef {
                max_rows: 100,
                max_cols: 100,
            }),
            parallel: true,
        },
        output: OutputDef {
            dir: PathBuf::from("/data/out"),
            sample_size: 50,
            full_graph_limit: None,
            write_summary: false,
        },
    };

    let path = std::env::temp_dir().join("dem_project_roundtrip.yaml");
    save_yaml(&path, &pipeline).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(pipeline, loaded);
}

#[test]
fn defaults_fill_missing_sections() {
    let dir = std::env::temp_dir().join("dem_project_defaults");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let path = dir.join("pipeline.yaml");
    std::fs::write(
        &path,
        r#"
version: 1
name: small
input:
  path: grid.json
  format:
    type: json
"#,
    )
    .unwrap();

    let pipeline = load_yaml(&path).unwrap();
    assert_eq!(pipeline.input.path, dir.join("grid.json"));
    assert_eq!(pipeline.input.format, RasterFormatDef::Json);
    assert_eq!(pipeline.output.dir, dir.join("out"));
    assert_eq!(pipeline.output.sample_size, 100);
    assert_eq!(pipeline.output.full_graph_limit, Some(10_000));
    assert!(pipeline.build.size_cap.is_none());
    assert!(!pipeline.build.parallel);
    assert!(pipeline.output.write_summary);
}

#[test]
fn raw_format_with_dims() {
    let path = std::env::temp_dir().join("dem_project_raw.yaml");
    std::fs::write(
        &path,
        r#"
version: 1
name: raw
input:
  path: /tmp/tile.bin
  format: { type: raw_i16, rows: 6000, cols: 4800 }
build:
  size_cap: { max_rows: 0, max_cols: 10 }
"#,
    )
    .unwrap();

    // zero cap is rejected on load
    assert!(matches!(
        load_yaml(&path),
        Err(ProjectError::Validation(_))
    ));
}
