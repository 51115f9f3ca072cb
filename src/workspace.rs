//! Workspace path confinement.

use crate::errors::AppError;
use std::path::{Component, Path, PathBuf};

/// Resolve `relative` against `base`, failing with `PathEscape` unless the
/// result is `base` itself or a descendant of it. The containment check is
/// lexical, so it also holds for write targets that do not exist yet.
/// Absolute `relative` inputs replace the base on join and then stand or
/// fall on the same check.
pub fn resolve_confined(base: &Path, relative: &str) -> Result<PathBuf, AppError> {
    let base = match dunce::canonicalize(base) {
        Ok(c) => c,
        Err(_) => {
            if !base.is_absolute() {
                return Err(AppError::InvalidParams(format!(
                    "base path must be absolute: {}",
                    base.display()
                )));
            }
            normalize(base)
        }
    };
    let resolved = normalize(&base.join(relative));
    // starts_with compares whole components, so /ws is not a prefix of /ws-evil
    if resolved.starts_with(&base) {
        Ok(resolved)
    } else {
        Err(AppError::PathEscape(relative.to_string()))
    }
}

/// Lexically collapse `.` and `..` components without touching the
/// filesystem. `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::Prefix(p) => out.push(p.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(c) => out.push(c),
        }
    }
    out
}
