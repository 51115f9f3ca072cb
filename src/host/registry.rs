use crate::{config::Config, errors::AppResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub type DynAction = Arc<dyn Action + Send + Sync + 'static>;

#[derive(Clone)]
pub struct ActionRegistry {
    actions: Vec<(String, DynAction)>,
}

impl ActionRegistry {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        use crate::actions::{
            file_read::FileReadAction, file_read_match::FileReadMatchAction,
            file_write::FileWriteAction, list_directories::ListDirectoriesAction,
            make_directory::MakeDirectoryAction, regex_match::RegexMatchAction,
        };
        let root = crate::config::canonical_root(&cfg.workspace.root_dir)?;
        let registered: Vec<DynAction> = vec![
            Arc::new(FileReadAction::new(root.clone())),
            Arc::new(FileWriteAction::new(root.clone())),
            Arc::new(FileReadMatchAction::new(root.clone())),
            Arc::new(RegexMatchAction::new()),
            Arc::new(ListDirectoriesAction::new(root.clone())),
            Arc::new(MakeDirectoryAction::new(root)),
        ];
        let mut actions: Vec<(String, DynAction)> =
            registered.into_iter().map(|a| (a.id().to_string(), a)).collect();
        actions.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(Self { actions })
    }

    pub fn get(&self, id: &str) -> Option<DynAction> { self.actions.iter().find(|(n, _)| n == id).map(|(_, a)| a.clone()) }
    pub fn list_ids(&self) -> Vec<String> { self.actions.iter().map(|(n, _)| n.clone()).collect() }
}

#[derive(Debug, Deserialize)]
pub struct CallRequest {
    pub id: String,
    pub action: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct CallResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")] pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")] pub error: Option<super::types::ErrorObj>,
}

/// One callable action: a stable id, a JSON input/output schema pair, and a
/// handler taking already-decoded JSON params.
#[async_trait]
pub trait Action {
    fn id(&self) -> &'static str;
    fn schema(&self) -> serde_json::Value;
    async fn call(&self, params: serde_json::Value) -> AppResult<serde_json::Value>;
}
