mod support;

use doc_translations::config::{self, AuditSettings, CONFIG_FILE_NAME};
use support::config_env::ConfigHomeGuard;

#[test]
fn missing_config_in_app_dir_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let _guard = ConfigHomeGuard::set(dir.path().to_path_buf());

    let settings = config::load_or_default().unwrap();

    assert_eq!(settings, AuditSettings::default());
    assert!(dir.path().join(".doc-translations").is_dir());
}

#[test]
fn saved_settings_are_loaded_from_the_app_dir() {
    let dir = tempfile::tempdir().unwrap();
    let _guard = ConfigHomeGuard::set(dir.path().to_path_buf());
    let path = config::config_path().unwrap();
    assert_eq!(path, dir.path().join(".doc-translations").join(CONFIG_FILE_NAME));

    let settings = AuditSettings {
        source_language: "en".into(),
        worker_count: 3,
        report_limit: 25,
        ..AuditSettings::default()
    };
    config::save_to_path(&settings, &path).unwrap();

    assert_eq!(config::load_or_default().unwrap(), settings);
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "source_language = \"ja\"\nextensions = [\".md\"]\n").unwrap();

    let settings = config::load_from(&path).unwrap();

    assert_eq!(settings.source_language, "ja");
    assert_eq!(settings.extensions, vec!["md".to_string()]);
    assert_eq!(settings.docs_root, AuditSettings::default().docs_root);
    assert_eq!(settings.report_limit, AuditSettings::default().report_limit);
}
