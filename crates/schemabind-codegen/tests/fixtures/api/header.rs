use std::collections::HashMap;

#[schema(category = "message", namespace = "org.zstack.header.message", base)]
pub struct APIMessage {
    #[field(hidden)]
    pub session: SessionInventory,
}

#[schema(category = "event", namespace = "org.zstack.header.message", base)]
pub struct APIEvent {
    pub success: bool,
    pub error: Option<HashMap<String, String>>,
}
