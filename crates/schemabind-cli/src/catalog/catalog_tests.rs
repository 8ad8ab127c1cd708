#![allow(non_snake_case)]

use super::*;
use std::fs;
use tempfile::TempDir;

const MANIFEST: &str = r#"
[catalog]
name = "zone-api"

[[types]]
name = "APIMessage"
qualified_name = "org.zstack.header.APIMessage"
category = "message"
base = true

[[types]]
name = "APICreateZoneMsg"
qualified_name = "org.zstack.header.zone.APICreateZoneMsg"
parent = "APIMessage"
category = "message"
"#;

const SOURCE: &str = r#"
#[schema(category = "inventory", namespace = "org.zstack.header.zone")]
pub struct ZoneInventory {
    pub uuid: String,
}
"#;

// CatalogSource tests

#[test]
fn CatalogSource___detect___toml_is_manifest() {
    assert_eq!(
        CatalogSource::detect(Path::new("schemabind.toml")),
        CatalogSource::Manifest
    );
}

#[test]
fn CatalogSource___detect___rust_file_is_sources() {
    assert_eq!(
        CatalogSource::detect(Path::new("src/api.RS")),
        CatalogSource::Sources
    );
}

#[test]
fn CatalogSource___detect___directory_is_sources() {
    let dir = TempDir::new().unwrap();

    assert_eq!(CatalogSource::detect(dir.path()), CatalogSource::Sources);
}

// load tests

#[test]
fn load___manifest___returns_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schemabind.toml");
    fs::write(&path, MANIFEST).unwrap();

    let catalog = load(&path).unwrap();

    assert_eq!(catalog.entries().len(), 2);
}

#[test]
fn load___source_directory___returns_entries() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("zone.rs"), SOURCE).unwrap();

    let catalog = load(dir.path()).unwrap();

    let entries = catalog.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].as_ref().unwrap().name, "ZoneInventory");
}

#[test]
fn load___missing_manifest___has_context() {
    let err = match load(Path::new("/nonexistent/schemabind.toml")) {
        Ok(_) => panic!("expected a load failure"),
        Err(e) => e,
    };

    assert!(err.to_string().contains("Failed to load catalog manifest"));
}

// check tests

#[test]
fn check___valid_manifest___succeeds() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schemabind.toml");
    fs::write(&path, MANIFEST).unwrap();

    assert!(check(&path).is_ok());
}

#[test]
fn check___manifest_with_unknown_parent___fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schemabind.toml");
    fs::write(&path, MANIFEST.replace("parent = \"APIMessage\"", "parent = \"Missing\"")).unwrap();

    let err = check(&path).unwrap_err();

    assert!(format!("{err:#}").contains("parent Missing not found"));
}

#[test]
fn check___source_with_bad_attribute___fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("zone.rs"), SOURCE).unwrap();
    fs::write(
        dir.path().join("broken.rs"),
        "#[schema(namespace = \"org.zstack\")]\npub struct NoCategory {}\n",
    )
    .unwrap();

    let err = check(dir.path()).unwrap_err();

    assert!(err.to_string().contains("1 of 2 types failed to load"));
}
