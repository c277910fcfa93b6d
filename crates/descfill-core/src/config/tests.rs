use super::*;

#[test]
fn test_defaults_when_sections_missing() {
    let cfg: Config = toml::from_str("").unwrap();
    assert_eq!(cfg.general.log_level, "info");
    assert_eq!(cfg.paratranz.base_url, "https://paratranz.cn/api");
    assert_eq!(cfg.paratranz.page_size, 100);
    assert_eq!(cfg.paratranz.key_pattern, "^item_desc");
    assert_eq!(cfg.text.dir, "data");
    assert_eq!(cfg.text.templates_file, "num_templates.txt");
    assert!(!cfg.notify.enabled);
}

#[test]
fn test_paratranz_section_from_toml() {
    let toml_str = r#"
        [paratranz]
        project_id = 4321
        token = "abc"
        page_size = 50
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.paratranz.project_id, 4321);
    assert_eq!(cfg.paratranz.token, "abc");
    assert_eq!(cfg.paratranz.page_size, 50);
    assert_eq!(
        cfg.paratranz.base_url, "https://paratranz.cn/api",
        "unset fields should keep their defaults"
    );
}

#[test]
fn test_text_path_joins_dir() {
    let text = TextConfig {
        dir: "/srv/tables".to_string(),
        ..Default::default()
    };
    assert_eq!(
        text.path(&text.keys_file),
        PathBuf::from("/srv/tables/keys.txt")
    );
}

#[test]
fn test_corpus_downloads_pairs() {
    let corpus = CorpusConfig::default();
    let pairs = corpus.downloads();
    assert_eq!(pairs[0].1, "en.ini");
    assert_eq!(pairs[1].1, "cn.ini");
    assert_eq!(pairs[2].1, "ref.ini");
    assert!(pairs[0].0.contains("orginal"));
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let cfg = load("/nonexistent/__descfill_config__.toml").unwrap();
    assert_eq!(cfg.text.keys_file, "keys.txt");
}

#[test]
fn test_load_invalid_toml_is_config_error() {
    let tmp = std::env::temp_dir().join("__descfill_test_bad_config__");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(&tmp).unwrap();
    let path = tmp.join("config.toml");
    std::fs::write(&path, "[paratranz\nproject_id = ").unwrap();

    let err = load(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, FillError::Config(_)), "got {err}");

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn test_shellexpand_leaves_plain_paths() {
    assert_eq!(shellexpand("data"), "data");
    assert_eq!(shellexpand("/abs/data"), "/abs/data");
}
