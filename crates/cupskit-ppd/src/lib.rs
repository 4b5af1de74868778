// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// cupskit PPD — marked option state for a PPD and writing the PPD back out
// with its `*Default` lines updated.  The PPD grammar itself belongs to the
// CUPS library and is not parsed here.

pub mod options;
pub mod rewrite;

pub use options::{Choice, Constraint, Group, OptionSet, PpdOption, UiKind};
pub use rewrite::{MarkedChoices, RewriteStats, parse_marks, rewrite_file, write_defaults};
