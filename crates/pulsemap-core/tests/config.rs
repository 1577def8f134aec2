use std::collections::HashMap;
use std::path::PathBuf;

use pulsemap_core::{AnalysisConfig, AnalysisError, ConfigOverrides};

#[test]
fn empty_document_yields_defaults() {
    let config = AnalysisConfig::from_toml_str("").unwrap();
    assert_eq!(config, AnalysisConfig::default());
    assert_eq!(config.vitals.rolling_window, 3);
    assert_eq!(config.vitals.decomposition_period, 1);
    assert_eq!(config.mobility.records, 1000);
    assert_eq!(config.mobility.clusters, 5);
    assert_eq!(config.mobility.seed, None);
    assert_eq!(config.mobility.map_center, [28.6448, 77.216721]);
}

#[test]
fn partial_document_overrides_selected_fields() {
    let config = AnalysisConfig::from_toml_str(
        r#"
output_dir = "artifacts"

[vitals]
decomposition_period = 3

[mobility]
seed = 17
zoom = 14
"#,
    )
    .unwrap();

    assert_eq!(config.output_dir, PathBuf::from("artifacts"));
    assert_eq!(config.vitals.decomposition_period, 3);
    assert_eq!(config.vitals.rolling_window, 3);
    assert_eq!(config.mobility.seed, Some(17));
    assert_eq!(config.mobility.zoom, 14);
    assert_eq!(config.mobility.records, 1000);
}

#[test]
fn malformed_document_is_rejected() {
    let err = AnalysisConfig::from_toml_str("[vitals]\nrolling_window = \"three\"").unwrap_err();
    assert!(matches!(err, AnalysisError::ConfigParse(_)));
}

#[test]
fn environment_overrides_output_dir_and_seed() {
    let env: HashMap<&str, &str> = [
        ("PULSEMAP_OUTPUT_DIR", "/tmp/pulsemap"),
        ("PULSEMAP_SEED", " 42 "),
    ]
    .into_iter()
    .collect();

    let mut config = AnalysisConfig::default();
    config
        .apply_env(|key| env.get(key).map(|value| value.to_string()))
        .unwrap();

    assert_eq!(config.output_dir, PathBuf::from("/tmp/pulsemap"));
    assert_eq!(config.mobility.seed, Some(42));

    let mut config = AnalysisConfig::default();
    let err = config
        .apply_env(|key| (key == "PULSEMAP_SEED").then(|| "abc".to_string()))
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Config(_)));
}

#[test]
fn validation_rejects_zero_sizes() {
    assert!(AnalysisConfig::default().validate().is_ok());

    let mut config = AnalysisConfig::default();
    config.vitals.rolling_window = 0;
    assert!(config.validate().is_err());

    let mut config = AnalysisConfig::default();
    config.mobility.clusters = 0;
    assert!(config.validate().is_err());

    let mut config = AnalysisConfig::default();
    config.vitals.decomposition_period = 0;
    assert!(config.validate().is_err());
}

fn lookup_in<'a>(env: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
    move |key| env.get(key).map(|value| value.to_string())
}

#[test]
fn resolve_layers_file_then_environment_then_flags() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("pulsemap.toml");
    std::fs::write(
        &path,
        "output_dir = \"from-file\"\n[vitals]\nrolling_window = 4\n[mobility]\nseed = 1\n",
    )?;

    let env: HashMap<&str, &str> = [
        ("PULSEMAP_OUTPUT_DIR", "from-env"),
        ("PULSEMAP_SEED", "2"),
    ]
    .into_iter()
    .collect();

    let no_flags = ConfigOverrides::default();

    let from_file = AnalysisConfig::resolve(Some(path.as_path()), |_| None, &no_flags)?;
    assert_eq!(from_file.output_dir, PathBuf::from("from-file"));
    assert_eq!(from_file.mobility.seed, Some(1));
    assert_eq!(from_file.vitals.rolling_window, 4);

    let from_env = AnalysisConfig::resolve(Some(path.as_path()), lookup_in(&env), &no_flags)?;
    assert_eq!(from_env.output_dir, PathBuf::from("from-env"));
    assert_eq!(from_env.mobility.seed, Some(2));
    assert_eq!(from_env.vitals.rolling_window, 4);

    let overrides = ConfigOverrides {
        output_dir: Some(PathBuf::from("from-flag")),
        seed: Some(3),
    };
    let from_flags = AnalysisConfig::resolve(Some(path.as_path()), lookup_in(&env), &overrides)?;
    assert_eq!(from_flags.output_dir, PathBuf::from("from-flag"));
    assert_eq!(from_flags.mobility.seed, Some(3));
    assert_eq!(from_flags.vitals.rolling_window, 4);
    Ok(())
}

#[test]
fn resolve_without_file_starts_from_defaults() -> anyhow::Result<()> {
    let overrides = ConfigOverrides {
        output_dir: None,
        seed: Some(9),
    };
    let config = AnalysisConfig::resolve(None, |_| None, &overrides)?;

    assert_eq!(config.output_dir, PathBuf::from("."));
    assert_eq!(config.mobility.seed, Some(9));
    assert_eq!(config.mobility, {
        let mut expected = AnalysisConfig::default().mobility;
        expected.seed = Some(9);
        expected
    });
    Ok(())
}

#[test]
fn resolve_validates_the_layered_result() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("zero.toml");
    std::fs::write(&path, "[mobility]\nclusters = 0\n")?;

    let no_flags = ConfigOverrides::default();
    let err = AnalysisConfig::resolve(Some(path.as_path()), |_| None, &no_flags).unwrap_err();
    assert!(matches!(err, AnalysisError::Config(_)));

    let missing = AnalysisConfig::resolve(
        Some(dir.path().join("absent.toml").as_path()),
        |_| None,
        &no_flags,
    )
    .unwrap_err();
    assert!(matches!(missing, AnalysisError::Io(_)));
    Ok(())
}
