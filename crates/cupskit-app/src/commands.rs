// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command implementations.  Each takes its input and output explicitly so the
// binary and the tests drive the same code.

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::info;

use cupskit_core::{ClientConfig, ConfigUpdate};
use cupskit_core::error::Result;
use cupskit_ppd::{parse_marks, rewrite_file, write_defaults};
use cupskit_sort::{model_sort, sort_models};

/// Read model names, one per line, and write them back in natural order.
/// Blank lines are dropped.
pub fn sort_lines<R: BufRead, W: Write>(input: R, out: &mut W) -> Result<()> {
    let mut names = Vec::new();
    for line in input.lines() {
        let line = line?;
        let name = line.trim_end_matches('\r');
        if !name.trim().is_empty() {
            names.push(name.to_string());
        }
    }
    sort_models(&mut names);
    for name in &names {
        writeln!(out, "{name}")?;
    }
    info!(count = names.len(), "model names sorted");
    Ok(())
}

pub fn compare<W: Write>(a: &str, b: &str, out: &mut W) -> Result<()> {
    writeln!(out, "{}", model_sort(a, b))?;
    Ok(())
}

/// Rewrite `ppd`'s `*Default` lines from `KEYWORD=CHOICE` marks, into
/// `output` when given, otherwise onto `out`.
pub fn defaults<W: Write>(
    ppd: &Path,
    marks: &[String],
    output: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    let marks = parse_marks(marks)?;
    match output {
        Some(dst) => {
            rewrite_file(ppd, dst, &marks)?;
        }
        None => {
            let reader = std::io::BufReader::new(std::fs::File::open(ppd)?);
            write_defaults(reader, out, &marks)?;
        }
    }
    Ok(())
}

/// Print the settings from `path` (defaults if absent) overlaid with the
/// environment seen through `lookup`.
pub fn show_config<F, W>(path: &Path, lookup: F, out: &mut W) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    let mut config = ClientConfig::load_or_default(path)?;
    config.apply_env(lookup);
    serde_json::to_writer_pretty(&mut *out, &config)?;
    writeln!(out)?;
    Ok(())
}

/// Apply `update` to the settings stored at `path` (defaults if absent),
/// save them back, and print the result. The environment is not consulted,
/// so only the file's own values are written.
pub fn update_config<W: Write>(path: &Path, update: &ConfigUpdate, out: &mut W) -> Result<()> {
    let mut config = ClientConfig::load_or_default(path)?;
    config.apply_update(update)?;
    config.save(path)?;
    serde_json::to_writer_pretty(&mut *out, &config)?;
    writeln!(out)?;
    Ok(())
}
