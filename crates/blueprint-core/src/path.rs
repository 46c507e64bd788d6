use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("path is absolute")]
    Absolute,

    #[error("path contains a parent-directory segment")]
    ParentTraversal,

    #[error("path contains a NUL byte")]
    NulByte,

    #[error("path contains a backslash; use '/' as the separator")]
    Backslash,

    #[error("path does not name a file")]
    NoFileName,

    #[error("path names the same file as {0:?}")]
    Duplicate(String),

    #[error("path is a directory of {0:?}")]
    DirectoryOfOther(String),
}

/// Check that `path` stays under whatever root it is later joined to.
///
/// `/` is the only separator; a `\` is rejected outright so the key means
/// the same thing on every platform. `.` segments and repeated separators
/// are tolerated; `..` anywhere is not.
pub fn validate_relative_path(path: &str) -> Result<(), PathError> {
    normalize_relative_path(path).map(|_| ())
}

/// Validate `path` and return it with `.` and empty segments removed,
/// so `./src//main.rs` and `src/main.rs` compare equal.
pub fn normalize_relative_path(path: &str) -> Result<String, PathError> {
    if path.trim().is_empty() {
        return Err(PathError::Empty);
    }
    if path.contains('\0') {
        return Err(PathError::NulByte);
    }
    if path.contains('\\') {
        return Err(PathError::Backslash);
    }
    if path.starts_with('/') || has_drive_prefix(path) {
        return Err(PathError::Absolute);
    }

    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            ".." => return Err(PathError::ParentTraversal),
            "" | "." => {}
            other => segments.push(other),
        }
    }

    if path.ends_with('/') || segments.is_empty() {
        return Err(PathError::NoFileName);
    }
    Ok(segments.join("/"))
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
