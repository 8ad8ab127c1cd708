//! Fixtures shared by unit tests

use crate::model::{ModelBuilder, TypeModel};
use schemabind_core::{
    Category, ExtendedObject, FieldDescriptor, Flavor, ForeignKey, StaticCatalog, TypeDescriptor,
};

pub(crate) fn message(name: &str) -> TypeDescriptor {
    TypeDescriptor::new(name, format!("org.example.{name}"), Category::Message)
}

/// Model of every descriptor, in parent-first order
pub(crate) fn model_of(descriptors: Vec<TypeDescriptor>) -> TypeModel {
    let names: Vec<String> = descriptors.iter().map(|d| d.name.clone()).collect();
    let catalog = StaticCatalog::from_descriptors(descriptors);
    let mut builder = ModelBuilder::new(&catalog).unwrap();
    builder.build_model(names).unwrap()
}

/// Model of the named descriptors, resolving parents against all of them
pub(crate) fn model_selecting(descriptors: Vec<TypeDescriptor>, selected: &[&str]) -> TypeModel {
    let catalog = StaticCatalog::from_descriptors(descriptors);
    let mut builder = ModelBuilder::new(&catalog).unwrap();
    builder
        .build_model(selected.iter().map(|s| s.to_string()))
        .unwrap()
}

/// `Widget{size: required}` and `FancyWidget: Widget {color: optional}`
pub(crate) fn widgets() -> Vec<TypeDescriptor> {
    vec![
        message("Widget").with_field(FieldDescriptor::scalar("size").required()),
        message("FancyWidget")
            .with_parent("Widget")
            .with_field(FieldDescriptor::scalar("color")),
    ]
}

fn ty(name: &str, namespace: &str, category: Category) -> TypeDescriptor {
    TypeDescriptor::new(name, format!("{namespace}.{name}"), category)
}

/// A small management-plane catalog touching every backend
pub(crate) fn zstack() -> Vec<TypeDescriptor> {
    const HEADER: &str = "org.zstack.header";
    const VM: &str = "org.zstack.vm";
    const HOST: &str = "org.zstack.host";

    vec![
        ty("APIMessage", HEADER, Category::Message)
            .base_type()
            .with_field(FieldDescriptor::scalar("session").hidden()),
        ty("APIListMessage", HEADER, Category::Message)
            .with_parent("APIMessage")
            .base_type()
            .abstract_type()
            .with_flavor(Flavor::List)
            .with_field(FieldDescriptor::scalar("limit").with_value_type("int")),
        ty("APIEvent", HEADER, Category::Event)
            .base_type()
            .with_event_type("key.event.API.API_EVENT"),
        ty("APIReply", HEADER, Category::Reply).base_type(),
        ty("APICreateVmInstanceMsg", VM, Category::Message)
            .with_parent("APIMessage")
            .with_field(FieldDescriptor::scalar("name").required().with_value_type("String"))
            .with_field(FieldDescriptor::collection("l3NetworkUuids").required())
            .with_field(FieldDescriptor::collection("systemTags"))
            .with_field(
                FieldDescriptor::scalar("strategy").with_valid_values(["InstantStart", "JustCreate"]),
            ),
        ty("APIListVmInstanceMsg", VM, Category::Message).with_parent("APIListMessage"),
        ty("APICreateVmInstanceEvent", VM, Category::Event)
            .with_parent("APIEvent")
            .with_field(FieldDescriptor::scalar("inventory").with_value_type("VmInstanceInventory")),
        ty("APIListVmInstanceReply", VM, Category::Reply)
            .with_parent("APIReply")
            .with_field(
                FieldDescriptor::collection("inventories").with_value_type("VmInstanceInventory"),
            ),
        ty("VmInstanceInventory", VM, Category::Inventory)
            .with_field(FieldDescriptor::scalar("uuid"))
            .with_field(FieldDescriptor::scalar("name"))
            .with_field(FieldDescriptor::scalar("state")),
        ty("VmInstanceState", VM, Category::Inventory).with_enum_values(["Running", "Stopped"]),
        ty("vm", VM, Category::Config).with_field(FieldDescriptor::scalar("cleanupInterval")),
        ty("VmInstanceEO", VM, Category::PersistedEntity)
            .with_field(FieldDescriptor::scalar("uuid"))
            .with_field(FieldDescriptor::scalar("name").indexed())
            .with_field(FieldDescriptor::scalar("hostUuid").with_foreign_key(ForeignKey::new("HostVO")))
            .with_field(FieldDescriptor::scalar("deleted")),
        ty("VmInstanceVO", VM, Category::PersistedEntity)
            .with_extended_object(ExtendedObject::new("VmInstanceEO"))
            .with_field(FieldDescriptor::scalar("uuid"))
            .with_field(FieldDescriptor::scalar("name").indexed())
            .with_field(FieldDescriptor::scalar("hostUuid").with_foreign_key(ForeignKey::new("HostVO"))),
        ty("HostVO", HOST, Category::PersistedEntity)
            .with_field(FieldDescriptor::scalar("uuid"))
            .with_field(FieldDescriptor::scalar("managementIp").indexed()),
    ]
}
