use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::tempdir;
use vef_forms::LabelPosition;
use vef_webservice::{load_config_from_path, ConfigError};

#[test]
fn test_load_config_from_yaml() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("config.yaml");
    let mut file = File::create(&file_path).unwrap();
    writeln!(
        file,
        r#"
title: "hello"
workspace: "/srv/hello"
size: [800, 600]
messages:
  submit: "Go"
form:
  label_position: left
  label_width: 90
"#
    )
    .unwrap();

    let config = load_config_from_path(&file_path).unwrap();
    assert_eq!(config.title, "hello");
    assert_eq!(config.workspace, PathBuf::from("/srv/hello"));
    assert_eq!(config.size, (800, 600));
    assert_eq!(config.position, (320, 200));
    assert_eq!(config.messages["submit"], "Go");
    assert_eq!(config.form.label_position, LabelPosition::Left);
    assert_eq!(config.form.label_width, 90);
}

#[test]
fn test_load_config_from_json() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("config.json");
    let mut file = File::create(&file_path).unwrap();
    writeln!(
        file,
        r#"
{{
    "title": "json app",
    "port": 9100,
    "debug": true,
    "chrome_flags": ["--incognito"]
}}
"#
    )
    .unwrap();

    let config = load_config_from_path(&file_path).unwrap();
    assert_eq!(config.title, "json app");
    assert_eq!(config.port, 9100);
    assert!(config.debug);
    assert_eq!(config.chrome_flags, vec!["--incognito".to_string()]);
    assert_eq!(config.lang, "en");
}

#[test]
fn test_load_config_from_toml() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("config.toml");
    let mut file = File::create(&file_path).unwrap();
    writeln!(
        file,
        r#"
title = "toml app"
lang = "zh-cn"
open_browser = false
log4rs_config = "log4rs.yaml"

[form]
submit_text = "Run"
"#
    )
    .unwrap();

    let config = load_config_from_path(&file_path).unwrap();
    assert_eq!(config.lang, "zh-cn");
    assert!(!config.open_browser);
    assert_eq!(config.log4rs_config, Some(PathBuf::from("log4rs.yaml")));
    assert_eq!(config.form.submit_text, "Run");
    assert_eq!(config.port, 9030);
}

#[test]
fn test_load_config_not_found() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("non_existent_config.yaml");
    let result = load_config_from_path(&file_path);
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
fn test_load_config_invalid_extension() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("config.txt");
    let mut file = File::create(&file_path).unwrap();
    writeln!(file, "this is not a valid config file").unwrap();

    let result = load_config_from_path(&file_path);
    assert!(matches!(result, Err(ConfigError::UnsupportedFileExtension)));
}

#[test]
fn test_load_config_invalid_content() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("config.yaml");
    let mut file = File::create(&file_path).unwrap();
    writeln!(file, "this is not a valid yaml file: [").unwrap();

    let result = load_config_from_path(&file_path);
    assert!(matches!(result, Err(ConfigError::Deserialization(_))));
}
