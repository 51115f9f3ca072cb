//! Pattern scanning over in-memory text.

use crate::errors::AppError;
use regex::{Captures, RegexBuilder};

/// Flags accepted on the wire as a compact string, e.g. `"gim"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanFlags {
    pub global: bool,
    pub case_insensitive: bool,
    pub multiline: bool,
    pub dot_matches_newline: bool,
}

impl ScanFlags {
    pub fn parse(s: &str) -> Result<Self, AppError> {
        let mut flags = ScanFlags::default();
        for ch in s.chars() {
            match ch {
                'g' => flags.global = true,
                'i' => flags.case_insensitive = true,
                'm' => flags.multiline = true,
                's' => flags.dot_matches_newline = true,
                _ => {
                    return Err(AppError::InvalidPattern(format!(
                        "unsupported regex flag '{ch}' in \"{s}\""
                    )))
                }
            }
        }
        Ok(flags)
    }
}

#[derive(Debug)]
pub struct ScanRequest<'a> {
    pub source: &'a str,
    pub pattern: &'a str,
    pub flags: ScanFlags,
    pub extract_group: Option<usize>,
}

/// One match: the extracted text, the 1-based line the match starts on, and
/// the byte offset of the match start in the full source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub value: String,
    pub line: usize,
    pub offset: usize,
}

/// Ordered scan result, immutable after construction.
#[derive(Debug, Default)]
pub struct MatchResult {
    records: Vec<MatchRecord>,
}

impl MatchResult {
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn has_matches(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn first(&self) -> Option<&MatchRecord> {
        self.records.first()
    }

    pub fn into_records(self) -> Vec<MatchRecord> {
        self.records
    }
}

/// Scan `source` for `pattern`. Global mode records every non-overlapping
/// match (the iterator advances past zero-length matches, so patterns that
/// can match the empty string still terminate); single mode records at most
/// the first. Line numbers are 1-based and counted over the full source.
pub fn scan(req: &ScanRequest<'_>) -> Result<MatchResult, AppError> {
    let re = RegexBuilder::new(req.pattern)
        .case_insensitive(req.flags.case_insensitive)
        .multi_line(req.flags.multiline)
        .dot_matches_new_line(req.flags.dot_matches_newline)
        .build()
        .map_err(|e| AppError::InvalidPattern(format!("{}: {e}", req.pattern)))?;

    let mut records = Vec::new();
    if req.flags.global {
        for caps in re.captures_iter(req.source) {
            records.push(record_from(&caps, req.source, req.extract_group));
        }
    } else if let Some(caps) = re.captures(req.source) {
        records.push(record_from(&caps, req.source, req.extract_group));
    }
    Ok(MatchResult { records })
}

fn record_from(caps: &Captures<'_>, source: &str, extract_group: Option<usize>) -> MatchRecord {
    // group 0 is the full match and always participates
    let full = caps.get(0).unwrap();
    // full match when the group is absent or did not participate
    let extracted = extract_group.and_then(|g| caps.get(g)).unwrap_or(full);
    MatchRecord {
        value: extracted.as_str().to_string(),
        line: line_at(source, full.start()),
        offset: full.start(),
    }
}

/// 1-based line of a byte offset: newlines strictly before the offset, plus one.
fn line_at(source: &str, offset: usize) -> usize {
    source.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}
