use crate::actions::{decode_params, default_encoding, effective_base, io_failure, to_output, Encoding};
use crate::errors::AppError;
use crate::host::registry::Action;
use crate::workspace::resolve_confined;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// file:read. Reads a file inside the workspace. A missing file is not an
/// error: the result carries `exists: false` with empty content.
pub struct FileReadAction { root: PathBuf }

impl FileReadAction {
    pub fn new(root: PathBuf) -> Self { Self { root } }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Params {
    file_path: String,
    #[serde(default = "default_encoding")]
    encoding: String,
    workspace_path: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    content: String,
    size: u64,
    exists: bool,
}

#[async_trait]
impl Action for FileReadAction {
    fn id(&self) -> &'static str { "file:read" }

    fn schema(&self) -> serde_json::Value {
        json!({
            "input": {"type":"object","required":["filePath"],"properties": {
                "filePath": {"type":"string"},
                "encoding": {"type":"string"},
                "workspacePath": {"type":"string"}
            }},
            "output": {"type":"object","properties": {
                "content": {"type":"string"},
                "size": {"type":"integer"},
                "exists": {"type":"boolean"}
            }}
        })
    }

    async fn call(&self, params: serde_json::Value) -> Result<serde_json::Value, AppError> {
        let p: Params = decode_params(params)?;
        let encoding = Encoding::parse(&p.encoding)?;
        let base = effective_base(&self.root, p.workspace_path.as_deref());
        let full = resolve_confined(&base, &p.file_path)?;

        info!(path = %full.display(), "reading file");

        if !full.exists() {
            warn!(path = %full.display(), "file not found");
            return to_output(Output { content: String::new(), size: 0, exists: false });
        }

        let meta = fs::metadata(&full).map_err(|e| io_failure(&full, e))?;
        if !meta.is_file() {
            return Err(AppError::NotAFile(full.display().to_string()));
        }

        let content = encoding.read_file(&full)?;
        info!(path = %full.display(), size = meta.len(), "read file");

        to_output(Output { content, size: meta.len(), exists: true })
    }
}
