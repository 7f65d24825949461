use std::{
    ffi::OsStr,
    fmt,
    path::Path,
};

use crate::{
    DomainError,
    Outcome,
};

static EMPTY_STR: &'static str = "";

/// Longest path (in characters) a [`FilePath`] accepts.
pub const MAX_PATH_LENGTH: usize = 260;

/// Utility functions for the systems path library
pub trait PathEx {
    /// Returns the file name from the current path, or an empty string if the file name is empty
    fn file_name_truncate(&self) -> &str;

    /// Returns the extension including the leading dot, or an empty string
    fn extension_dotted(&self) -> String;
}

impl PathEx for Path {
    fn file_name_truncate(&self) -> &str {
        self.file_name()
            .map(OsStr::to_str)
            .flatten()
            .unwrap_or(EMPTY_STR)
    }

    fn extension_dotted(&self) -> String {
        self.extension()
            .and_then(OsStr::to_str)
            .map(|extension| format!(".{}", extension))
            .unwrap_or_default()
    }
}

/// A validated location on the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FilePath {
    value: String,
}

impl FilePath {
    pub fn create(path: impl Into<String>) -> Outcome<Self> {
        let value = path.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation("File path cannot be empty"));
        }

        if value.chars().count() > MAX_PATH_LENGTH {
            return Err(DomainError::validation(format!(
                "File path exceeds maximum length of {} characters",
                MAX_PATH_LENGTH
            )));
        }

        Ok(Self { value })
    }

    /// Create a path from a std path. Non UTF-8 segments are replaced lossily.
    pub fn from_path(path: &Path) -> Outcome<Self> {
        Self::create(path.to_string_lossy().into_owned())
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.value)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn file_name(&self) -> &str {
        self.as_path().file_name_truncate()
    }

    pub fn directory_path(&self) -> String {
        self.as_path()
            .parent()
            .map(|parent| parent.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn extension(&self) -> String {
        self.as_path().extension_dotted()
    }

    /// Append a segment. The result is validated again.
    pub fn join(&self, segment: &str) -> Outcome<Self> {
        Self::from_path(&self.as_path().join(segment))
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Match a file name against a search pattern made of `*` (any run of characters)
/// and `?` (exactly one character). Every other character matches itself.
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    let pattern = pattern.chars().collect::<Vec<_>>();
    let name = name.chars().collect::<Vec<_>>();

    let (mut p, mut n) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;
    while n < name.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == name[n]) {
            p += 1;
            n += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            backtrack = Some((p, n));
            p += 1;
        } else if let Some((star, matched)) = backtrack {
            p = star + 1;
            n = matched + 1;
            backtrack = Some((star, matched + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}
