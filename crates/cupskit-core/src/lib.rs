// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// cupskit — Core error type, client configuration, and version checks shared
// across all crates.

pub mod config;
pub mod error;
pub mod version;

pub use config::{ClientConfig, ConfigUpdate, Encryption};
pub use error::CupskitError;
pub use version::{Version, require};
