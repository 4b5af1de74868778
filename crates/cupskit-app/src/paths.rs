// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Config file location.

use std::path::PathBuf;

const CONFIG_FILE: &str = "client.json";

/// Default path of the client settings file. The directory is not created;
/// a missing file simply means defaults.
pub fn client_config_path() -> PathBuf {
    config_base().join("cupskit").join(CONFIG_FILE)
}

fn config_base() -> PathBuf {
    // Try XDG config dir, then fallback to home
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg);
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config");
    }
    // Last resort
    PathBuf::from("/tmp")
}
