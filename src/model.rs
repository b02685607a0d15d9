use std::collections::BTreeMap;
use std::path::PathBuf;

/// Variables produced by one load, keyed by name.
pub type EnvMap = BTreeMap<String, String>;

/// A parsed `KEY=VALUE` entry from a `.env` file or input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    pub source: Option<PathBuf>,
    /// 1-based line number of the line that produced this entry.
    pub line: u32,
}

/// Summary of an [`EnvLoader`](crate::EnvLoader) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub files_read: usize,
    pub files_missing: usize,
    pub loaded: usize,
}

/// Decoding applied to file contents before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8, replacing invalid sequences with U+FFFD.
    #[default]
    Utf8Lossy,
    /// UTF-8, rejecting invalid input.
    Utf8,
}
