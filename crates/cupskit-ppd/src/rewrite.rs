// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Writing a PPD back out with its `*Default` lines replaced by the currently
// marked choices.  Every other line is copied byte for byte, so PPDs in
// legacy encodings survive untouched.

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use cupskit_core::error::{CupskitError, Result};

use crate::options::OptionSet;

const DEFAULT_PREFIX: &[u8] = b"*Default";

/// Source of the marked choice for an option keyword.
///
/// Keywords match ASCII case-insensitively, as CUPS matches them.
pub trait MarkedChoices {
    fn marked_choice(&self, keyword: &str) -> Option<&str>;

    /// Keywords the caller asked for explicitly. Any that never meet a
    /// `*Default` line are reported after a rewrite.
    fn requested_keywords(&self) -> Vec<&str> {
        Vec::new()
    }
}

impl MarkedChoices for OptionSet {
    fn marked_choice(&self, keyword: &str) -> Option<&str> {
        self.find_marked_choice(keyword).map(|c| c.choice.as_str())
    }
}

impl MarkedChoices for HashMap<String, String> {
    fn marked_choice(&self, keyword: &str) -> Option<&str> {
        self.get(keyword)
            .or_else(|| {
                self.iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(keyword))
                    .map(|(_, v)| v)
            })
            .map(String::as_str)
    }

    fn requested_keywords(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }
}

/// Counters from one rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Lines read.
    pub lines: usize,
    /// `*Default` lines replaced.
    pub rewritten: usize,
    /// Requested keywords with no `*Default` line in the PPD, sorted.
    pub unmatched: Vec<String>,
}

/// Parse `KEYWORD=CHOICE` marks into a lookup table.
pub fn parse_marks<I, S>(marks: I) -> Result<HashMap<String, String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    marks
        .into_iter()
        .map(|m| {
            let m = m.as_ref();
            match m.split_once('=') {
                Some((k, v)) if !k.trim().is_empty() && !v.trim().is_empty() => {
                    Ok((k.trim().to_string(), v.trim().to_string()))
                }
                _ => Err(CupskitError::InvalidMark(m.to_string())),
            }
        })
        .collect()
}

/// Copy `input` to `output`, replacing each `*Default<Keyword>` line whose
/// keyword has a marked choice with `*Default<Keyword>: <choice>`.
///
/// An unmarked `PageRegion` takes the marked `PageSize` choice. A replaced
/// line keeps a carriage return if the original line had one.
pub fn write_defaults<R, W, M>(mut input: R, mut output: W, marks: &M) -> Result<RewriteStats>
where
    R: BufRead,
    W: Write,
    M: MarkedChoices + ?Sized,
{
    let mut stats = RewriteStats::default();
    let mut seen: Vec<String> = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        stats.lines += 1;

        let Some(keyword) = default_keyword(&line) else {
            output.write_all(&line)?;
            continue;
        };
        seen.push(keyword.to_string());

        match default_replacement(&line, keyword, marks) {
            Some(replacement) => {
                output.write_all(&replacement)?;
                stats.rewritten += 1;
            }
            None => output.write_all(&line)?,
        }
    }

    output.flush()?;

    let has_line = |k: &str| {
        seen.iter().any(|s| s.eq_ignore_ascii_case(k))
            // A PageSize mark also feeds an unmarked *DefaultPageRegion.
            || (k.eq_ignore_ascii_case("PageSize")
                && seen.iter().any(|s| s.eq_ignore_ascii_case("PageRegion")))
    };
    let mut unmatched: Vec<String> = marks
        .requested_keywords()
        .into_iter()
        .filter(|k| !has_line(*k))
        .map(str::to_string)
        .collect();
    unmatched.sort();
    for keyword in &unmatched {
        warn!(keyword = %keyword, "no *Default line for requested option");
    }
    stats.unmatched = unmatched;

    info!(lines = stats.lines, rewritten = stats.rewritten, "PPD defaults written");
    Ok(stats)
}

/// Rewrite the PPD at `src` into `dst`.
///
/// The output goes to a temporary file next to `dst` that is renamed over it
/// once complete, so `dst` is either the old file or the new one, never a
/// partial write. `src` and `dst` may be the same file.
pub fn rewrite_file<M>(src: &Path, dst: &Path, marks: &M) -> Result<RewriteStats>
where
    M: MarkedChoices + ?Sized,
{
    let data = std::fs::read(src)?;
    let dir = match dst.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    let stats = write_defaults(data.as_slice(), std::io::BufWriter::new(tmp.as_file_mut()), marks)?;
    tmp.as_file().sync_all()?;
    tmp.persist(dst).map_err(|e| e.error)?;

    debug!(src = %src.display(), dst = %dst.display(), "PPD rewritten");
    Ok(stats)
}

/// The option keyword of a `*Default` line, if `line` is one.
fn default_keyword(line: &[u8]) -> Option<&str> {
    let rest = line.strip_prefix(DEFAULT_PREFIX)?;
    let end = keyword_end(rest);
    std::str::from_utf8(&rest[..end]).ok()
}

fn keyword_end(rest: &[u8]) -> usize {
    rest.iter()
        .position(|&b| b == b':' || b.is_ascii_whitespace() || b == 0x0b)
        .unwrap_or(rest.len())
}

/// The replacement for the `*Default` line `line`, or `None` to copy it
/// unchanged.
fn default_replacement<M>(line: &[u8], keyword: &str, marks: &M) -> Option<Vec<u8>>
where
    M: MarkedChoices + ?Sized,
{
    let choice = marks.marked_choice(keyword).or_else(|| {
        keyword
            .eq_ignore_ascii_case("PageRegion")
            .then(|| marks.marked_choice("PageSize"))
            .flatten()
    })?;
    debug!(keyword, choice, "replacing default");

    let tail = &line[DEFAULT_PREFIX.len() + keyword.len()..];
    let mut out = Vec::with_capacity(DEFAULT_PREFIX.len() + keyword.len() + choice.len() + 4);
    out.extend_from_slice(DEFAULT_PREFIX);
    out.extend_from_slice(keyword.as_bytes());
    out.extend_from_slice(b": ");
    out.extend_from_slice(choice.as_bytes());
    if tail.contains(&b'\r') {
        out.push(b'\r');
    }
    out.push(b'\n');
    Some(out)
}
