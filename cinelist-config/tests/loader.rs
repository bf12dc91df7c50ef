//! Layering behaviour of the catalog config loader.

use std::io::Write;
use std::time::Duration;

use cinelist_config::{ConfigLoadError, ConfigLoader, ConfigSource};
use cinelist_model::ViewerId;

fn write_temp(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn empty_environment_yields_defaults() {
    let load = ConfigLoader::new()
        .with_env_vars(Vec::<(String, String)>::new())
        .load()
        .expect("load defaults");

    assert_eq!(load.sources, vec![ConfigSource::Defaults]);
    assert_eq!(load.config.api_url.as_str(), "http://localhost:3001/");
    assert_eq!(load.config.viewer_id, ViewerId(1));
    assert_eq!(load.config.trending_limit, 4);
}

#[test]
fn file_values_are_overridden_by_environment() {
    let file = write_temp(
        r#"
api_url = "http://catalog.internal:8080/api/"
request_timeout = "30s"
viewer_id = 9
trending_limit = 6
"#,
        ".toml",
    );

    let load = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_vars([("CINELIST_VIEWER_ID", "12")])
        .load()
        .expect("load layered config");

    assert_eq!(
        load.config.api_url.as_str(),
        "http://catalog.internal:8080/api/"
    );
    assert_eq!(load.config.request_timeout, Duration::from_secs(30));
    assert_eq!(load.config.trending_limit, 6);
    assert_eq!(load.config.viewer_id, ViewerId(12));
    assert_eq!(
        load.sources,
        vec![
            ConfigSource::Defaults,
            ConfigSource::File(file.path().to_path_buf()),
            ConfigSource::Environment,
        ]
    );
}

#[test]
fn config_path_can_come_from_environment() {
    let file = write_temp("trending_limit = 2\n", ".toml");
    let path = file.path().to_string_lossy().into_owned();

    let load = ConfigLoader::new()
        .with_env_vars([("CINELIST_CONFIG", path.as_str())])
        .load()
        .expect("load config named by env");

    assert_eq!(load.config.trending_limit, 2);
}

#[test]
fn env_file_sits_under_the_environment() {
    let env_file = write_temp(
        "CINELIST_API_URL=http://from-dotenv:3001\nCINELIST_TRENDING_LIMIT=3\n",
        ".env",
    );

    let load = ConfigLoader::new()
        .with_env_file(env_file.path())
        .with_env_vars([("CINELIST_TRENDING_LIMIT", "5")])
        .load()
        .expect("load with env file");

    assert_eq!(load.config.api_url.host_str(), Some("from-dotenv"));
    assert_eq!(load.config.trending_limit, 5);
    assert!(load
        .sources
        .contains(&ConfigSource::EnvFile(env_file.path().to_path_buf())));
}

#[test]
fn zero_trending_limit_is_rejected() {
    let err = ConfigLoader::new()
        .with_env_vars([("CINELIST_TRENDING_LIMIT", "0")])
        .load()
        .unwrap_err();

    assert!(matches!(
        err,
        ConfigLoadError::Invalid { ref key, .. } if key == "trending_limit"
    ));
}

#[test]
fn malformed_values_name_the_variable() {
    let err = ConfigLoader::new()
        .with_env_vars([("CINELIST_REQUEST_TIMEOUT", "whenever")])
        .load()
        .unwrap_err();

    assert!(err.to_string().contains("CINELIST_REQUEST_TIMEOUT"));
}

#[test]
fn unknown_file_keys_are_reported() {
    let file = write_temp("api_ur = \"http://typo\"\n", ".toml");

    let err = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_vars(Vec::<(String, String)>::new())
        .load()
        .unwrap_err();

    assert!(matches!(err, ConfigLoadError::Toml { .. }));
}
