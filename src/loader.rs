use std::borrow::Cow;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Error;
use crate::model::{Encoding, Entry, EnvMap, LoadReport};
use crate::parser::{into_map, parse_str_with_source};

/// File name looked up by [`load_dotenv_from_root`].
pub const DOTENV_FILENAME: &str = ".env";

/// Load the dotenv file at exactly `path`.
///
/// Returns an empty map when the file does not exist. Any other I/O error is
/// returned unchanged.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<EnvMap, Error> {
    EnvLoader::new().path(path).load()
}

/// Load `.env` from `root`.
pub fn load_dotenv_from_root(root: impl AsRef<Path>) -> Result<EnvMap, Error> {
    load_env_file(root.as_ref().join(DOTENV_FILENAME))
}

/// Read the full text of `path`, or `None` if it does not exist.
///
/// Invalid UTF-8 is replaced with U+FFFD and a leading byte-order mark is
/// dropped. Use [`EnvLoader::encoding`] for strict decoding.
pub fn read_env_file(path: impl AsRef<Path>) -> Result<Option<String>, Error> {
    read_text(path.as_ref(), Encoding::default())
}

/// Builder-style dotenv loader.
#[derive(Debug, Clone, Default)]
pub struct EnvLoader {
    paths: Vec<PathBuf>,
    encoding: Encoding,
    required: bool,
}

impl EnvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.paths.push(path.as_ref().to_path_buf());
        self
    }

    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.paths
            .extend(paths.into_iter().map(|path| path.as_ref().to_path_buf()));
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Treat a missing file as an error instead of skipping it.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Parse every file without folding into a map. Later files win per key.
    pub fn parse_only(&self) -> Result<Vec<Entry>, Error> {
        let (entries, _) = self.collect_entries()?;
        Ok(entries)
    }

    pub fn load(&self) -> Result<EnvMap, Error> {
        let (map, _) = self.load_with_report()?;
        Ok(map)
    }

    pub fn load_with_report(&self) -> Result<(EnvMap, LoadReport), Error> {
        let (entries, mut report) = self.collect_entries()?;
        report.loaded = entries.len();
        debug!(
            "loaded {} variables from {} file(s)",
            report.loaded, report.files_read
        );
        Ok((into_map(entries), report))
    }

    fn collect_entries(&self) -> Result<(Vec<Entry>, LoadReport), Error> {
        let mut merged_entries = Vec::new();
        let mut by_key = HashMap::<String, usize>::new();
        let mut report = LoadReport::default();

        for path in self.effective_paths() {
            let Some(content) = read_text(&path, self.encoding)? else {
                if self.required {
                    return Err(Error::Io(std::io::Error::new(
                        ErrorKind::NotFound,
                        format!("dotenv file not found: {}", path.display()),
                    )));
                }
                report.files_missing += 1;
                continue;
            };
            report.files_read += 1;

            for entry in parse_str_with_source(&content, Some(&path)) {
                if let Some(existing_idx) = by_key.get(&entry.key).copied() {
                    merged_entries[existing_idx] = entry;
                } else {
                    by_key.insert(entry.key.clone(), merged_entries.len());
                    merged_entries.push(entry);
                }
            }
        }

        Ok((merged_entries, report))
    }

    fn effective_paths(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            vec![PathBuf::from(DOTENV_FILENAME)]
        } else {
            self.paths.clone()
        }
    }
}

fn read_text(path: &Path, encoding: Encoding) -> Result<Option<String>, Error> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("no dotenv file at {}", path.display());
            return Ok(None);
        }
        Err(err) => return Err(Error::Io(err)),
    };
    debug!("reading dotenv file {}", path.display());

    let text = decode(&bytes, encoding)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    Ok(Some(text.to_owned()))
}

fn decode(bytes: &[u8], encoding: Encoding) -> Result<Cow<'_, str>, Error> {
    match encoding {
        Encoding::Utf8Lossy => Ok(String::from_utf8_lossy(bytes)),
        Encoding::Utf8 => Ok(Cow::Borrowed(std::str::from_utf8(bytes)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_paths_default_to_dotenv() {
        let loader = EnvLoader::new();
        assert_eq!(loader.effective_paths(), vec![PathBuf::from(".env")]);
    }

    #[test]
    fn effective_paths_keep_given_order() {
        let loader = EnvLoader::new().path("a.env").paths(["b.env", "c.env"]);
        assert_eq!(
            loader.effective_paths(),
            vec![
                PathBuf::from("a.env"),
                PathBuf::from("b.env"),
                PathBuf::from("c.env"),
            ]
        );
    }

    #[test]
    fn decode_lossy_replaces_invalid_bytes() {
        let decoded = decode(b"A=\xff", Encoding::Utf8Lossy).expect("lossy decode never fails");
        assert_eq!(decoded, "A=\u{fffd}");
    }

    #[test]
    fn decode_strict_rejects_invalid_bytes() {
        let err = decode(b"A=\xff", Encoding::Utf8).expect_err("expected encoding error");
        match err {
            Error::InvalidEncoding(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
