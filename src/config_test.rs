use std::collections::HashMap;
use std::path::PathBuf;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.public_dir, PathBuf::from("public"));
    assert_eq!(cfg.catalog_path, PathBuf::from("public/furniture.json"));
    assert_eq!(cfg.backgrounds_path, PathBuf::from("public/backgrounds.json"));
}

#[test]
fn feed_paths_follow_public_dir() {
    let cfg = ServerConfig::from_lookup(lookup(&[("PUBLIC_DIR", "/srv/site")])).unwrap();
    assert_eq!(cfg.catalog_path, PathBuf::from("/srv/site/furniture.json"));
    assert_eq!(cfg.backgrounds_path, PathBuf::from("/srv/site/backgrounds.json"));
}

#[test]
fn explicit_overrides_win() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("PORT", " 8080 "),
        ("CATALOG_PATH", "/data/catalog.json"),
        ("BACKGROUNDS_PATH", "/data/bg.json"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.catalog_path, PathBuf::from("/data/catalog.json"));
    assert_eq!(cfg.backgrounds_path, PathBuf::from("/data/bg.json"));
}

#[test]
fn unparsable_port_errors() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "eighty"));
    assert!(err.to_string().contains("invalid PORT"));
}

#[test]
fn out_of_range_port_errors() {
    assert!(ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).is_err());
}
