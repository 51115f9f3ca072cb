use crate::actions::{decode_params, to_output};
use crate::errors::AppError;
use crate::host::registry::Action;
use crate::scan::{scan, ScanFlags, ScanRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

fn default_flags() -> String { "g".to_string() }

/// regex:match. Scans caller-supplied text, no filesystem involved.
pub struct RegexMatchAction;

impl RegexMatchAction {
    pub fn new() -> Self { Self }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Params {
    text: String,
    pattern: String,
    #[serde(default = "default_flags")]
    flags: String,
    extract_group: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    matches: Vec<String>,
    match_count: usize,
    has_matches: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_match: Option<String>,
}

#[async_trait]
impl Action for RegexMatchAction {
    fn id(&self) -> &'static str { "regex:match" }

    fn schema(&self) -> serde_json::Value {
        json!({
            "input": {"type":"object","required":["text","pattern"],"properties": {
                "text": {"type":"string"},
                "pattern": {"type":"string"},
                "flags": {"type":"string"},
                "extractGroup": {"type":"integer"}
            }},
            "output": {"type":"object","properties": {
                "matches": {"type":"array","items": {"type":"string"}},
                "matchCount": {"type":"integer"},
                "hasMatches": {"type":"boolean"},
                "firstMatch": {"type":"string"}
            }}
        })
    }

    async fn call(&self, params: serde_json::Value) -> Result<serde_json::Value, AppError> {
        let p: Params = decode_params(params)?;
        let flags = ScanFlags::parse(&p.flags)?;

        info!(pattern = %p.pattern, "matching text");

        let result = scan(&ScanRequest {
            source: &p.text,
            pattern: &p.pattern,
            flags,
            extract_group: p.extract_group,
        })?;

        info!(matches = result.count(), "matched text");

        let match_count = result.count();
        let has_matches = result.has_matches();
        let first_match = result.first().map(|r| r.value.clone());
        let matches: Vec<String> = result.into_records().into_iter().map(|r| r.value).collect();

        to_output(Output { matches, match_count, has_matches, first_match })
    }
}
