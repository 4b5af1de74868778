// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for cupskit.

use thiserror::Error;

/// Top-level error type for all cupskit operations.
#[derive(Debug, Error)]
pub enum CupskitError {
    // -- Version checks --
    #[error("I am version {have}")]
    VersionTooOld { have: String, required: String },

    #[error("invalid version string: {0:?}")]
    InvalidVersion(String),

    // -- PPD options --
    #[error("no such option: {0}")]
    UnknownOption(String),

    #[error("option {option} has no choice {choice}")]
    UnknownChoice { option: String, choice: String },

    #[error("malformed option mark {0:?} (expected KEYWORD=CHOICE)")]
    InvalidMark(String),

    // -- Configuration --
    #[error("configuration error: {0}")]
    Config(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CupskitError>;
