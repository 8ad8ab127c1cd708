#![allow(non_snake_case)]

use super::*;
use crate::test_support::{message, model_of, model_selecting, widgets};
use schemabind_core::{Category, TypeDescriptor};
use test_case::test_case;

fn known(names: &[&str]) -> HashSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test_case(Some("String"), "string" ; "string")]
#[test_case(Some("long"), "number" ; "long")]
#[test_case(Some("i32"), "number" ; "rust integer")]
#[test_case(Some("Boolean"), "boolean" ; "boolean")]
#[test_case(Some("VmInventory"), "VmInventory" ; "known type")]
#[test_case(Some("Unknown"), "any" ; "unknown type")]
#[test_case(None, "any" ; "undeclared")]
fn ts_type___maps_value_types(value_type: Option<&str>, expected: &str) {
    assert_eq!(ts_type(value_type, &known(&["VmInventory"])), expected);
}

#[test]
fn write_interface___marks_optional_fields() {
    let model = model_of(vec![
        message("CreateVmMsg")
            .with_field(FieldDescriptor::scalar("name").required().with_value_type("String"))
            .with_field(FieldDescriptor::collection("l3NetworkUuids").with_value_type("String"))
            .with_field(FieldDescriptor::map("tags"))
            .with_field(FieldDescriptor::scalar("secret").hidden()),
    ]);
    let mut out = String::new();

    write_interface(model.get("CreateVmMsg").unwrap(), &HashSet::new(), &mut out);

    assert_eq!(
        out,
        "export interface CreateVmMsg {\n\
         \x20   name: string;\n\
         \x20   l3NetworkUuids?: string[];\n\
         \x20   tags?: {[key: string]: any};\n\
         }\n\n"
    );
}

#[test]
fn write_interface___extends_parent() {
    let model = model_of(widgets());
    let mut out = String::new();

    write_interface(model.get("FancyWidget").unwrap(), &HashSet::new(), &mut out);

    assert!(out.starts_with("export interface FancyWidget extends Widget {\n"));
    assert!(!out.contains("size"));
}

#[test]
fn render_interfaces___writes_each_type_once_across_sets() {
    let descriptors = vec![
        message("Widget"),
        message("FancyWidget").with_parent("Widget"),
        TypeDescriptor::new("WidgetInventory", "org.example.WidgetInventory", Category::Inventory)
            .with_field(FieldDescriptor::collection("widgets").with_value_type("FancyWidget")),
    ];
    let messages = model_selecting(descriptors.clone(), &["FancyWidget"]);
    let events = model_selecting(descriptors.clone(), &["Widget"]);
    let inventories = model_selecting(descriptors, &["WidgetInventory"]);
    let mut memo = EmissionMemo::new();

    let out = render_interfaces(
        InterfaceSets {
            messages: &messages,
            events: &events,
            inventories: &inventories,
        },
        &mut memo,
    )
    .unwrap();

    assert_eq!(out.matches("export interface Widget {").count(), 1);
    assert!(out.find("interface Widget {").unwrap() < out.find("interface FancyWidget").unwrap());
    assert!(out.contains("    widgets?: FancyWidget[];\n"));
    assert_eq!(memo.len(), 3);
}
