use crate::actions::{decode_params, io_failure, to_output};
use crate::errors::AppError;
use crate::host::registry::Action;
use crate::workspace::resolve_confined;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing::info;

fn default_recursive() -> bool { true }

/// file:makeDirectory. Creates a directory rooted at the workspace.
pub struct MakeDirectoryAction { root: PathBuf }

impl MakeDirectoryAction {
    pub fn new(root: PathBuf) -> Self { Self { root } }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Params {
    dir_path: String,
    #[serde(default = "default_recursive")]
    recursive: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    created_path: String,
}

#[async_trait]
impl Action for MakeDirectoryAction {
    fn id(&self) -> &'static str { "file:makeDirectory" }

    fn schema(&self) -> serde_json::Value {
        json!({
            "input": {"type":"object","required":["dirPath"],"properties": {
                "dirPath": {"type":"string"},
                "recursive": {"type":"boolean"}
            }},
            "output": {"type":"object","properties": {
                "createdPath": {"type":"string"}
            }}
        })
    }

    async fn call(&self, params: serde_json::Value) -> Result<serde_json::Value, AppError> {
        let p: Params = decode_params(params)?;
        let full = resolve_confined(&self.root, &p.dir_path)?;

        info!(path = %full.display(), "making directory");

        if p.recursive {
            fs::create_dir_all(&full).map_err(|e| io_failure(&full, e))?;
        } else {
            fs::create_dir(&full).map_err(|e| io_failure(&full, e))?;
        }

        info!(path = %full.display(), "created directory");

        to_output(Output { created_path: full.display().to_string() })
    }
}
