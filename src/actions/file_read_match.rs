use crate::actions::{decode_params, default_encoding, effective_base, io_failure, to_output, Encoding};
use crate::errors::AppError;
use crate::host::registry::Action;
use crate::scan::{scan, ScanFlags, ScanRequest};
use crate::workspace::resolve_confined;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing::info;

fn default_flags() -> String { "g".to_string() }

/// file:readAndMatch. Reads a workspace file and scans it for a pattern,
/// reporting each match with its line number and byte offset. Unlike
/// file:read, a missing file here is an error.
pub struct FileReadMatchAction { root: PathBuf }

impl FileReadMatchAction {
    pub fn new(root: PathBuf) -> Self { Self { root } }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Params {
    file_path: String,
    pattern: String,
    #[serde(default = "default_flags")]
    flags: String,
    #[serde(default = "default_encoding")]
    encoding: String,
    extract_group: Option<usize>,
    workspace_path: Option<String>,
}

#[derive(Debug, Serialize)]
struct MatchOut {
    #[serde(rename = "match")]
    value: String,
    line: usize,
    index: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    matches: Vec<MatchOut>,
    match_count: usize,
    has_matches: bool,
    file_size: u64,
    line_count: usize,
}

#[async_trait]
impl Action for FileReadMatchAction {
    fn id(&self) -> &'static str { "file:readAndMatch" }

    fn schema(&self) -> serde_json::Value {
        json!({
            "input": {"type":"object","required":["filePath","pattern"],"properties": {
                "filePath": {"type":"string"},
                "pattern": {"type":"string"},
                "flags": {"type":"string"},
                "encoding": {"type":"string"},
                "extractGroup": {"type":"integer"},
                "workspacePath": {"type":"string"}
            }},
            "output": {"type":"object","properties": {
                "matches": {"type":"array","items": {"type":"object","properties": {
                    "match": {"type":"string"},
                    "line": {"type":"integer"},
                    "index": {"type":"integer"}
                }}},
                "matchCount": {"type":"integer"},
                "hasMatches": {"type":"boolean"},
                "fileSize": {"type":"integer"},
                "lineCount": {"type":"integer"}
            }}
        })
    }

    async fn call(&self, params: serde_json::Value) -> Result<serde_json::Value, AppError> {
        let p: Params = decode_params(params)?;
        let encoding = Encoding::parse(&p.encoding)?;
        let flags = ScanFlags::parse(&p.flags)?;
        let base = effective_base(&self.root, p.workspace_path.as_deref());
        let full = resolve_confined(&base, &p.file_path)?;

        info!(path = %full.display(), pattern = %p.pattern, "reading and matching file");

        if !full.exists() {
            return Err(AppError::NotFound(full.display().to_string()));
        }
        let meta = fs::metadata(&full).map_err(|e| io_failure(&full, e))?;
        if !meta.is_file() {
            return Err(AppError::NotAFile(full.display().to_string()));
        }

        let content = encoding.read_file(&full)?;
        let line_count = content.split('\n').count();

        let result = scan(&ScanRequest {
            source: &content,
            pattern: &p.pattern,
            flags,
            extract_group: p.extract_group,
        })?;

        info!(path = %full.display(), matches = result.count(), "matched file");

        let match_count = result.count();
        let has_matches = result.has_matches();
        let matches: Vec<MatchOut> = result
            .into_records()
            .into_iter()
            .map(|r| MatchOut { value: r.value, line: r.line, index: r.offset })
            .collect();

        to_output(Output {
            matches,
            match_count,
            has_matches,
            file_size: meta.len(),
            line_count,
        })
    }
}
