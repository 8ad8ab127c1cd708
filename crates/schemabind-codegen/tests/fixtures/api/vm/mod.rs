#[schema(category = "message", namespace = "org.zstack.header.vm", parent = "APIMessage")]
pub struct APIStartVmInstanceMsg {
    #[field(required)]
    pub uuid: String,
    #[field(valid_values = ["InstantStart", "JustCreate"])]
    pub strategy: Option<String>,
}

#[schema(category = "event", namespace = "org.zstack.header.vm", parent = "APIEvent")]
pub struct APIStartVmInstanceEvent {
    pub inventory: VmInstanceInventory,
}

#[schema(category = "inventory", namespace = "org.zstack.header.vm")]
pub struct VmInstanceInventory {
    pub uuid: String,
    pub name: String,
    pub nics: Vec<VmNicInventory>,
}

#[schema(category = "inventory", namespace = "org.zstack.header.vm")]
pub enum VmInstanceState {
    Running,
    Stopped,
}

#[schema(category = "persisted_entity", namespace = "org.zstack.header.vm")]
pub struct VmInstanceVO {
    pub uuid: String,
    #[field(index)]
    pub name: String,
    #[field(transient)]
    pub nics: Vec<String>,
}
