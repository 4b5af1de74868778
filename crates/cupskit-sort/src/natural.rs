// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Natural ordering of printer and driver model names.
//
// A model string is split into maximal runs of ASCII digits and maximal runs
// of everything else.  Runs are compared pairwise from the left:
//
//   digits vs digits  numeric value, then the shorter run ("7" < "007")
//   text   vs text    ordinal, a strict prefix sorts first
//   digits vs text    digits first
//
// and a string that runs out of runs first sorts first.  So "HP LaserJet 9"
// sorts before "HP LaserJet 10".

use std::cmp::Ordering;

/// One maximal run of a model string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

/// Splits a string into alternating digit and text runs.
struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Runs<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = Run<'a>;

    fn next(&mut self) -> Option<Run<'a>> {
        // ASCII digits are single bytes and never appear inside a multi-byte
        // UTF-8 sequence, so the first byte decides the run kind.
        let digit = self.rest.as_bytes().first()?.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digit)
            .unwrap_or(self.rest.len());
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digit { Run::Digits(run) } else { Run::Text(run) })
    }
}

/// Compare two model strings in natural order.
///
/// Total over all inputs: never panics, and digit runs of any length are
/// compared by magnitude without converting to a fixed-width integer.
///
/// Equal numeric values written with different numbers of digits are not
/// equal: the shorter run sorts first, so `"7" < "007"`. This keeps the
/// ordering consistent with string equality (only identical strings compare
/// `Equal`) and matches what CUPS front ends have always done; whether the
/// tie-break was ever intended is unclear.
pub fn compare_model_strings(a: &str, b: &str) -> Ordering {
    let mut left = Runs::new(a);
    let mut right = Runs::new(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match compare_runs(x, y) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}

/// Integer form of [`compare_model_strings`]: -1, 0 or 1.
pub fn model_sort(a: &str, b: &str) -> i32 {
    match compare_model_strings(a, b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

fn compare_runs(a: Run<'_>, b: Run<'_>) -> Ordering {
    match (a, b) {
        (Run::Digits(x), Run::Digits(y)) => compare_digits(x, y),
        (Run::Digits(_), Run::Text(_)) => Ordering::Less,
        (Run::Text(_), Run::Digits(_)) => Ordering::Greater,
        // Byte order of UTF-8 is code point order.
        (Run::Text(x), Run::Text(y)) => x.cmp(y),
    }
}

/// Compare two non-empty ASCII digit runs by value, then by length.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let sig_a = a.trim_start_matches('0');
    let sig_b = b.trim_start_matches('0');
    sig_a
        .len()
        .cmp(&sig_b.len())
        .then_with(|| sig_a.cmp(sig_b))
        .then_with(|| a.len().cmp(&b.len()))
}
