use std::io::Write;
use std::time::Duration;

use photoshare_kiosk::config::Configuration;
use tempfile::NamedTempFile;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(yaml.as_bytes()).expect("write temp config");
    file
}

#[test]
fn minimal_config_gets_documented_defaults() {
    let file = write_config("backend-url: \"http://127.0.0.1:8000\"\n");
    let cfg = Configuration::from_yaml_file(file.path())
        .expect("load config")
        .validated()
        .expect("valid config");

    assert_eq!(cfg.backend_url, "http://127.0.0.1:8000");
    assert_eq!(cfg.photos_path, "/api/photos");
    assert_eq!(cfg.upload_path, "/api/upload");
    assert_eq!(cfg.upload_url, "http://photoshare.local");
    assert_eq!(cfg.rotation_interval, Duration::from_millis(7000));
    assert_eq!(cfg.polling_interval, Duration::from_millis(10_000));
}

#[test]
fn intervals_accept_humantime_strings() {
    let file = write_config(
        r#"
backend-url: "https://photos.example.org"
photos-path: "/v2/photos"
upload-path: "/v2/upload"
upload-url: "https://photos.example.org/upload"
rotation-interval: 5s
polling-interval: 1500ms
var-dir: /tmp/kiosk
"#,
    );
    let cfg = Configuration::from_yaml_file(file.path())
        .expect("load config")
        .validated()
        .expect("valid config");

    assert_eq!(cfg.rotation_interval, Duration::from_secs(5));
    assert_eq!(cfg.polling_interval, Duration::from_millis(1500));
    assert_eq!(cfg.photos_path, "/v2/photos");
    assert_eq!(cfg.var_dir.to_str(), Some("/tmp/kiosk"));
}

#[test]
fn backend_url_must_be_http() {
    let file = write_config("backend-url: \"ftp://nope\"\n");
    let err = Configuration::from_yaml_file(file.path())
        .expect("load config")
        .validated()
        .unwrap_err();
    assert!(err.to_string().contains("backend-url"));
}

#[test]
fn zero_intervals_are_rejected() {
    let file = write_config(
        "backend-url: \"http://127.0.0.1:8000\"\nrotation-interval: 0s\n",
    );
    let err = Configuration::from_yaml_file(file.path())
        .expect("load config")
        .validated()
        .unwrap_err();
    assert!(err.to_string().contains("rotation-interval"));
}

#[test]
fn unknown_keys_are_rejected() {
    let file = write_config(
        "backend-url: \"http://127.0.0.1:8000\"\nrotation-intervl: 5s\n",
    );
    assert!(Configuration::from_yaml_file(file.path()).is_err());
}

#[test]
fn missing_backend_url_is_an_error() {
    let file = write_config("rotation-interval: 5s\n");
    assert!(Configuration::from_yaml_file(file.path()).is_err());
}
