#![allow(non_snake_case)]

use super::*;
use std::io::Write;
use test_case::test_case;

#[test]
fn GeneratorConfig___default___uses_zstack_schema_and_api_ts() {
    let config = GeneratorConfig::default();

    assert_eq!(config.sql.schema, "zstack");
    assert_eq!(config.interface_file, "api.ts");
    assert_eq!(config.stub.package, "zstack.ui.api");
    assert!(config.stub.base_event_type.is_none());
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn GeneratorConfig___from_json___empty_bytes_yield_default() {
    let config = GeneratorConfig::from_json(b"").unwrap();

    assert_eq!(config, GeneratorConfig::default());
}

#[test]
fn GeneratorConfig___from_toml___reads_nested_sections() {
    let toml = r#"
        output_root = "/srv/bindings"
        namespaces = ["org.example"]
        log_level = "debug"

        [data_class]
        helper_types = ["ErrorCode"]

        [stub]
        base_event_type = "APIEvent"

        [sql]
        schema = "cloud"
    "#;

    let config = GeneratorConfig::from_toml(toml).unwrap();

    assert_eq!(config.output_root, PathBuf::from("/srv/bindings"));
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.data_class.helper_types, vec!["ErrorCode"]);
    assert_eq!(config.stub.base_event_type.as_deref(), Some("APIEvent"));
    assert_eq!(config.stub.package, "zstack.ui.api");
    assert_eq!(config.sql.schema, "cloud");
    assert_eq!(config.interface_file, "api.ts");
}

#[test]
fn GeneratorConfig___from_file___rejects_invalid_schema() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(b"[sql]\nschema = \"bad`name\"\n").unwrap();

    let result = GeneratorConfig::from_file(file.path());

    assert!(matches!(result, Err(CatalogError::Config(_))));
}

#[test]
fn GeneratorConfig___from_file___missing_file_is_config_error() {
    let result = GeneratorConfig::from_file("/nonexistent/schemabind.toml");

    assert!(matches!(result, Err(CatalogError::Config(_))));
}

#[test_case(RequestKind::DataClassBinding, "schemabind-python-template" ; "data class")]
#[test_case(RequestKind::StubBinding, "schemabind-groovy-template" ; "stub")]
#[test_case(RequestKind::SqlView, "schemabind-mysql-view" ; "sql view")]
#[test_case(RequestKind::DocumentArtifact, "schemabind-testlink" ; "document")]
fn GeneratorConfig___default_output___joins_kind_directory(kind: RequestKind, dir: &str) {
    let config = GeneratorConfig::with_output_root("/srv/out");

    assert_eq!(config.default_output(kind), PathBuf::from("/srv/out").join(dir));
}

#[test]
fn GeneratorConfig___default_output___interface_points_at_file() {
    let config = GeneratorConfig::with_output_root("/srv/out");

    assert_eq!(
        config.default_output(RequestKind::InterfaceBinding),
        PathBuf::from("/srv/out/schemabind-api-typescript/api.ts")
    );
}

#[test]
fn GeneratorConfig___resolve_output___prefers_explicit_path() {
    let config = GeneratorConfig::with_output_root("/srv/out");
    let request = GenerationRequest::new(RequestKind::SqlIndex).with_output("/tmp/idx");

    assert_eq!(config.resolve_output(&request), PathBuf::from("/tmp/idx"));
}

#[test]
fn GeneratorConfig___resolve_namespaces___falls_back_to_whole_catalog() {
    let config = GeneratorConfig::default();
    let request = GenerationRequest::new(RequestKind::SqlIndex);

    assert_eq!(config.resolve_namespaces(&request), vec![String::new()]);
}

#[test]
fn GeneratorConfig___resolve_namespaces___uses_configured_defaults() {
    let config = GeneratorConfig {
        namespaces: vec!["org.example".to_string()],
        ..GeneratorConfig::default()
    };
    let request = GenerationRequest::new(RequestKind::SqlIndex);
    let explicit = GenerationRequest::new(RequestKind::SqlIndex).with_namespace("org.other");

    assert_eq!(config.resolve_namespaces(&request), vec!["org.example"]);
    assert_eq!(config.resolve_namespaces(&explicit), vec!["org.other"]);
}
