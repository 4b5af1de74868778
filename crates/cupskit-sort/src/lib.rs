// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// cupskit Sort — natural, number-aware ordering for printer and driver model
// names, so that "LaserJet 9" comes before "LaserJet 10".

pub mod model;
pub mod natural;

pub use model::{ModelName, sort_models, sorted_models};
pub use natural::{compare_model_strings, model_sort};
