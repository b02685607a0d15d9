use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use log::trace;

use crate::error::Error;
use crate::model::{Entry, EnvMap};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse dotenv text into a map. Malformed lines are skipped.
pub fn parse_str(input: &str) -> EnvMap {
    into_map(parse_str_with_source(input, None))
}

/// Parse dotenv text into entries, one per distinct key.
///
/// Entries keep the order in which each key first appeared. When a key
/// repeats, its slot holds the last occurrence.
pub fn parse_entries(input: &str) -> Vec<Entry> {
    parse_str_with_source(input, None)
}

/// Parse dotenv bytes, replacing invalid UTF-8 with U+FFFD.
pub fn parse_bytes(input: &[u8]) -> EnvMap {
    parse_str(&String::from_utf8_lossy(input))
}

/// Parse dotenv entries from a buffered reader.
pub fn parse_reader<R: BufRead>(mut reader: R) -> Result<EnvMap, Error> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(parse_bytes(&buf))
}

pub(crate) fn parse_str_with_source(input: &str, source: Option<&Path>) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut by_key = HashMap::<String, usize>::new();

    for (idx, line) in input.split('\n').enumerate() {
        let line_num = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        let Some(entry) = parse_line(line, line_num, source) else {
            continue;
        };

        if let Some(existing_idx) = by_key.get(&entry.key).copied() {
            entries[existing_idx] = entry;
        } else {
            by_key.insert(entry.key.clone(), entries.len());
            entries.push(entry);
        }
    }

    entries
}

pub(crate) fn into_map(entries: Vec<Entry>) -> EnvMap {
    entries
        .into_iter()
        .map(|entry| (entry.key, entry.value))
        .collect()
}

fn parse_line(line: &str, line_num: u32, source: Option<&Path>) -> Option<Entry> {
    let working = trim(line);
    if working.is_empty() || working.starts_with('#') {
        return None;
    }

    let Some((key, value)) = working.split_once('=') else {
        trace!("skipping line {line_num}: no `=` separator");
        return None;
    };

    Some(Entry {
        key: trim(key).to_owned(),
        value: unquote(trim(value)).to_owned(),
        source: source.map(Path::to_path_buf),
        line: line_num,
    })
}

// `\r` is whitespace, so CRLF line endings fall away here too.
fn trim(text: &str) -> &str {
    text.trim_matches(|ch: char| ch.is_whitespace() || ch == BYTE_ORDER_MARK)
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() < 2 {
        return value;
    }

    let first = bytes[0];
    let last = bytes[bytes.len() - 1];
    if first == last && (first == b'"' || first == b'\'') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
