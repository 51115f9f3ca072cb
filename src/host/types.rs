use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct Capabilities {
    pub version: &'static str,
    pub actions: Vec<ActionInfo>,
}

#[derive(Debug, Serialize)]
pub struct ActionInfo {
    pub id: String,
    pub input_schema: serde_json::Value,
    pub output_schema: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorObj {
    pub code: String,
    pub message: String,
}
