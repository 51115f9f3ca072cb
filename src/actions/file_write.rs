use crate::actions::{decode_params, default_encoding, effective_base, io_failure, to_output, Encoding};
use crate::errors::AppError;
use crate::host::registry::Action;
use crate::workspace::resolve_confined;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// file:write. Writes content to a file inside the workspace, creating
/// parent directories by default.
pub struct FileWriteAction { root: PathBuf }

impl FileWriteAction {
    pub fn new(root: PathBuf) -> Self { Self { root } }
}

fn default_create_directories() -> bool { true }

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Params {
    file_path: String,
    content: String,
    #[serde(default = "default_encoding")]
    encoding: String,
    workspace_path: Option<String>,
    #[serde(default = "default_create_directories")]
    create_directories: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    file_path: String,
    size: u64,
}

#[async_trait]
impl Action for FileWriteAction {
    fn id(&self) -> &'static str { "file:write" }

    fn schema(&self) -> serde_json::Value {
        json!({
            "input": {"type":"object","required":["filePath","content"],"properties": {
                "filePath": {"type":"string"},
                "content": {"type":"string"},
                "encoding": {"type":"string"},
                "workspacePath": {"type":"string"},
                "createDirectories": {"type":"boolean"}
            }},
            "output": {"type":"object","properties": {
                "filePath": {"type":"string"},
                "size": {"type":"integer"}
            }}
        })
    }

    async fn call(&self, params: serde_json::Value) -> Result<serde_json::Value, AppError> {
        let p: Params = decode_params(params)?;
        let encoding = Encoding::parse(&p.encoding)?;
        let base = effective_base(&self.root, p.workspace_path.as_deref());
        let full = resolve_confined(&base, &p.file_path)?;

        info!(path = %full.display(), "writing file");

        if p.create_directories {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).map_err(|e| io_failure(parent, e))?;
            }
        }

        encoding.write_file(&full, &p.content)?;
        let meta = fs::metadata(&full).map_err(|e| io_failure(&full, e))?;

        info!(path = %full.display(), size = meta.len(), "wrote file");

        to_output(Output { file_path: full.display().to_string(), size: meta.len() })
    }
}
