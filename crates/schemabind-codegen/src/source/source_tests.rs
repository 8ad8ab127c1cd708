#![allow(non_snake_case)]

use super::*;
use std::fs;
use tempfile::TempDir;

fn ok(entries: &[CatalogEntry], index: usize) -> &TypeDescriptor {
    entries[index].as_ref().unwrap()
}

// parse_source tests

#[test]
fn SourceCatalog___parse_source___extracts_annotated_struct() {
    let source = r#"
        #[schema(category = "message", namespace = "org.zstack.vm", parent = "APIMessage")]
        pub struct APIStartVmInstanceMsg {
            #[field(required)]
            pub uuid: String,
            pub host_uuid: Option<String>,
            #[field(hidden)]
            pub session: String,
        }

        pub struct NotASchemaType {
            pub ignored: String,
        }
    "#;

    let entries = SourceCatalog::parse_source(source, "fallback");

    assert_eq!(entries.len(), 1);
    let descriptor = ok(&entries, 0);
    assert_eq!(descriptor.name, "APIStartVmInstanceMsg");
    assert_eq!(descriptor.qualified_name, "org.zstack.vm.APIStartVmInstanceMsg");
    assert_eq!(descriptor.parent.as_deref(), Some("APIMessage"));
    assert_eq!(descriptor.category, Category::Message);
    assert!(descriptor.fields[0].required);
    assert!(!descriptor.fields[1].required);
    assert_eq!(descriptor.fields[1].value_type.as_deref(), Some("String"));
    assert!(descriptor.fields[2].hidden);
}

#[test]
fn SourceCatalog___parse_source___classifies_field_kinds() {
    let source = r#"
        #[schema(category = "inventory")]
        pub struct VmInventory {
            pub name: String,
            pub nics: Vec<VmNicInventory>,
            pub tags: Option<HashSet<String>>,
            pub labels: HashMap<String, String>,
        }
    "#;

    let entries = SourceCatalog::parse_source(source, "org.zstack.vm");

    let fields = &ok(&entries, 0).fields;
    assert_eq!(fields[0].kind, FieldKind::Scalar);
    assert_eq!(fields[1].kind, FieldKind::Collection);
    assert_eq!(fields[1].value_type.as_deref(), Some("VmNicInventory"));
    assert_eq!(fields[2].kind, FieldKind::Collection);
    assert_eq!(fields[3].kind, FieldKind::Map);
    assert_eq!(ok(&entries, 0).qualified_name, "org.zstack.vm.VmInventory");
}

#[test]
fn SourceCatalog___parse_source___reads_type_flags() {
    let source = r#"
        #[schema(category = "message", abstract, base, flavor = "list", no_binding)]
        pub struct APIListMessage {}

        #[schema(category = "event", event_type = "key.event.API.API_EVENT", not_instantiable)]
        pub struct APIEvent {}
    "#;

    let entries = SourceCatalog::parse_source(source, "org.zstack.header");

    let list = ok(&entries, 0);
    assert!(list.is_abstract);
    assert!(list.base);
    assert!(list.no_binding);
    assert_eq!(list.flavor, Some(Flavor::List));
    let event = ok(&entries, 1);
    assert_eq!(event.event_type.as_deref(), Some("key.event.API.API_EVENT"));
    assert!(!event.instantiable);
}

#[test]
fn SourceCatalog___parse_source___reads_persistence_attributes() {
    let source = r#"
        #[schema(category = "persisted_entity", companion = "VmInstanceEO", no_view)]
        pub struct VmInstanceVO {
            #[field(index)]
            pub name: String,
            #[field(foreign_key = "HostVO", on_delete = "set_null")]
            pub host_uuid: Option<String>,
            #[field(transient)]
            pub cached: String,
        }
    "#;

    let entries = SourceCatalog::parse_source(source, "org.zstack.vm");

    let vo = ok(&entries, 0);
    let extended = vo.extended_object.as_ref().unwrap();
    assert_eq!(extended.companion, "VmInstanceEO");
    assert_eq!(extended.soft_deleted_column, "deleted");
    assert!(!extended.need_view);
    assert!(vo.fields[0].index);
    let fk = vo.fields[1].foreign_key.as_ref().unwrap();
    assert_eq!(fk.parent_entity, "HostVO");
    assert_eq!(fk.parent_key, "uuid");
    assert_eq!(fk.on_delete, ReferenceOption::SetNull);
    assert!(!vo.fields[2].column);
}

#[test]
fn SourceCatalog___parse_source___reads_valid_values_and_constants() {
    let source = r#"
        #[schema(category = "inventory", constants(INITIAL_STATE = "Created"))]
        pub struct VmConstant {
            #[field(valid_values = ["Running", "Stopped"])]
            pub state: String,
        }
    "#;

    let entries = SourceCatalog::parse_source(source, "org.zstack.vm");

    let descriptor = ok(&entries, 0);
    assert_eq!(descriptor.fields[0].valid_values, vec!["Running", "Stopped"]);
    assert_eq!(descriptor.constants[0].name, "INITIAL_STATE");
    assert_eq!(descriptor.constants[0].value, "Created");
}

#[test]
fn SourceCatalog___parse_source___extracts_enum_values() {
    let source = r#"
        #[schema(category = "inventory", namespace = "org.zstack.vm")]
        pub enum VmInstanceState {
            Running,
            Stopped,
        }
    "#;

    let entries = SourceCatalog::parse_source(source, "");

    let descriptor = ok(&entries, 0);
    assert!(descriptor.is_enum);
    assert_eq!(descriptor.enum_values, vec!["Running", "Stopped"]);
}

#[test]
fn SourceCatalog___parse_source___isolates_bad_attribute() {
    let source = r#"
        #[schema(category = "bogus")]
        pub struct Broken {}

        #[schema]
        pub struct MissingCategory {}

        #[schema(category = "message")]
        pub struct Fine {}
    "#;

    let entries = SourceCatalog::parse_source(source, "org.example");

    assert_eq!(entries.len(), 3);
    match &entries[0] {
        Err(CatalogError::ScanFailure { type_name, reason }) => {
            assert_eq!(type_name, "Broken");
            assert!(reason.contains("unknown category"));
        }
        other => panic!("unexpected entry: {other:?}"),
    }
    assert!(entries[1].is_err());
    assert_eq!(ok(&entries, 2).name, "Fine");
}

#[test]
fn SourceCatalog___parse_source___rejects_orphan_foreign_key_options() {
    let source = r#"
        #[schema(category = "persisted_entity")]
        pub struct HostVO {
            #[field(on_delete = "cascade")]
            pub zone_uuid: String,
        }
    "#;

    let entries = SourceCatalog::parse_source(source, "org.zstack.host");

    assert!(entries[0].is_err());
}

#[test]
fn SourceCatalog___parse_source___reports_duplicate_names() {
    let source = r#"
        #[schema(category = "message")]
        pub struct Twice {}

        mod inner {}

        #[schema(category = "reply")]
        pub struct Other {}
    "#;
    let mut entries = SourceCatalog::parse_source(source, "a");
    entries.extend(SourceCatalog::parse_source(source, "b"));
    dedup_names(&mut entries);

    assert!(entries[0].is_ok());
    assert!(entries[2].is_err());
    assert!(entries[3].is_err());
}

#[test]
fn SourceCatalog___parse_source___unparsable_source_is_one_failure() {
    let entries = SourceCatalog::parse_source("pub struct {", "org.example");

    assert_eq!(entries.len(), 1);
    assert!(entries[0].as_ref().unwrap_err().is_per_type());
}

// scan tests

#[test]
fn SourceCatalog___scan___derives_namespace_from_module_path() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("vm")).unwrap();
    fs::write(
        dir.path().join("vm/messages.rs"),
        r#"#[schema(category = "message")] pub struct StartVmMsg {}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("vm/mod.rs"),
        r#"#[schema(category = "inventory")] pub struct VmInventory {}"#,
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "#[schema] ignored").unwrap();

    let catalog = SourceCatalog::scan(dir.path()).unwrap();
    let entries = catalog.entries();

    assert_eq!(entries.len(), 2);
    assert_eq!(ok(&entries, 0).qualified_name, "vm.messages.StartVmMsg");
    assert_eq!(ok(&entries, 1).qualified_name, "vm.VmInventory");
    assert!(catalog.find_type("VmInventory").is_some());
}

#[test]
fn SourceCatalog___scan___single_file_uses_stem() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("api.rs");
    fs::write(&file, r#"#[schema(category = "message")] pub struct PingMsg {}"#).unwrap();

    let catalog = SourceCatalog::scan(&file).unwrap();

    assert_eq!(ok(&catalog.entries(), 0).qualified_name, "api.PingMsg");
    assert_eq!(catalog.root(), file.as_path());
}

#[test]
fn SourceCatalog___scan___missing_root_is_load_error() {
    let dir = TempDir::new().unwrap();

    let err = SourceCatalog::scan(dir.path().join("missing")).unwrap_err();

    assert!(matches!(err, CatalogError::Load { .. }));
}

#[cfg(unix)]
#[test]
fn SourceCatalog___scan___does_not_follow_directory_symlinks() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("api")).unwrap();
    fs::write(
        dir.path().join("api/vm.rs"),
        r#"#[schema(category = "inventory")] pub struct VmInventory {}"#,
    )
    .unwrap();
    std::os::unix::fs::symlink(dir.path(), dir.path().join("api/loop")).unwrap();

    let catalog = SourceCatalog::scan(dir.path()).unwrap();
    let entries = catalog.entries();

    assert_eq!(entries.len(), 1);
    assert_eq!(ok(&entries, 0).qualified_name, "api.vm.VmInventory");
}

#[test]
fn SourceCatalog___scan___visits_files_in_name_order() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("b")).unwrap();
    fs::write(dir.path().join("b/mod.rs"), r#"#[schema(category = "reply")] pub struct Second {}"#).unwrap();
    fs::write(dir.path().join("a.rs"), r#"#[schema(category = "reply")] pub struct First {}"#).unwrap();

    let entries = SourceCatalog::scan(dir.path()).unwrap().entries();

    assert_eq!(ok(&entries, 0).name, "First");
    assert_eq!(ok(&entries, 1).name, "Second");
}
