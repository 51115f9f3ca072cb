use crate::actions::{io_failure, to_output};
use crate::errors::AppError;
use crate::host::registry::Action;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// file:listDirectories. Lists the immediate subdirectory names of the workspace
/// root. A missing root is soft: warns and yields an empty result object.
pub struct ListDirectoriesAction { root: PathBuf }

impl ListDirectoriesAction {
    pub fn new(root: PathBuf) -> Self { Self { root } }
}

#[derive(Debug, Serialize)]
struct Output {
    entries: Vec<String>,
}

#[async_trait]
impl Action for ListDirectoriesAction {
    fn id(&self) -> &'static str { "file:listDirectories" }

    fn schema(&self) -> serde_json::Value {
        json!({
            "input": {"type":"object","properties": {}},
            "output": {"type":"object","properties": {
                "entries": {"type":"array","items": {"type":"string"}}
            }}
        })
    }

    async fn call(&self, _params: serde_json::Value) -> Result<serde_json::Value, AppError> {
        info!(path = %self.root.display(), "listing directories");

        if !self.root.exists() {
            warn!(path = %self.root.display(), "directory not found");
            return Ok(json!({}));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(|e| io_failure(&self.root, e))? {
            let entry = entry.map_err(|e| io_failure(&self.root, e))?;
            let ftype = entry.file_type().map_err(|e| io_failure(&entry.path(), e))?;
            if ftype.is_dir() {
                entries.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        entries.sort();

        info!(count = entries.len(), "listed directories");

        to_output(Output { entries })
    }
}
