pub mod file_read;
pub mod file_read_match;
pub mod file_write;
pub mod list_directories;
pub mod make_directory;
pub mod regex_match;

use crate::errors::AppError;
use base64::Engine;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Decode validated JSON params into an action's typed input.
pub(crate) fn decode_params<T: DeserializeOwned>(params: serde_json::Value) -> Result<T, AppError> {
    serde_json::from_value(params).map_err(|e| AppError::InvalidParams(e.to_string()))
}

pub(crate) fn to_output<T: serde::Serialize>(out: T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(out).map_err(|e| AppError::Io(e.to_string()))
}

/// Effective confinement base: the per-call override when given, otherwise
/// the configured workspace root.
pub(crate) fn effective_base(root: &Path, workspace_path: Option<&str>) -> PathBuf {
    match workspace_path {
        Some(p) => PathBuf::from(p),
        None => root.to_path_buf(),
    }
}

pub(crate) fn io_failure(path: &Path, e: io::Error) -> AppError {
    AppError::Io(format!("{}: {e}", path.display()))
}

pub(crate) fn default_encoding() -> String {
    "utf8".to_string()
}

/// Content transport for reads and writes. `utf8` carries text as-is,
/// `base64` carries raw file bytes as base64 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Encoding {
    Utf8,
    Base64,
}

impl Encoding {
    pub(crate) fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "base64" => Ok(Encoding::Base64),
            other => Err(AppError::InvalidParams(format!("unsupported encoding: {other}"))),
        }
    }

    pub(crate) fn read_file(&self, path: &Path) -> Result<String, AppError> {
        match self {
            Encoding::Utf8 => fs::read_to_string(path).map_err(|e| io_failure(path, e)),
            Encoding::Base64 => {
                let data = fs::read(path).map_err(|e| io_failure(path, e))?;
                Ok(base64::engine::general_purpose::STANDARD.encode(data))
            }
        }
    }

    pub(crate) fn write_file(&self, path: &Path, content: &str) -> Result<(), AppError> {
        match self {
            Encoding::Utf8 => fs::write(path, content).map_err(|e| io_failure(path, e)),
            Encoding::Base64 => {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(content)
                    .map_err(|_| AppError::InvalidParams("invalid base64 content".into()))?;
                fs::write(path, bytes).map_err(|e| io_failure(path, e))
            }
        }
    }
}
