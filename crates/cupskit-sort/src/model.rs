// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Model names that order naturally, and helpers for sorting lists of them.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::natural::compare_model_strings;

/// A printer or driver model name, ordered with [`compare_model_strings`].
///
/// Usable directly as a `BTreeMap`/`BTreeSet` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelName(pub String);

impl ModelName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for ModelName {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_model_strings(&self.0, &other.0)
    }
}

impl PartialOrd for ModelName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModelName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModelName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ModelName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Sort model names in place, in natural order. Stable.
pub fn sort_models<S: AsRef<str>>(models: &mut [S]) {
    models.sort_by(|a, b| compare_model_strings(a.as_ref(), b.as_ref()));
}

/// Collect model names into a naturally sorted `Vec`.
pub fn sorted_models<I, S>(models: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = models.into_iter().map(Into::into).collect();
    sort_models(&mut out);
    out
}
