// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Client connection settings: which user to connect as, which server and port
// to talk to, and the encryption policy.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CupskitError, Result};

/// Default IPP port.
pub const DEFAULT_PORT: u16 = 631;

/// HTTP encryption policy, numbered as the CUPS client library numbers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Encryption {
    /// Encrypt only when the server asks for it.
    #[default]
    IfRequested,
    /// Never encrypt.
    Never,
    /// Upgrade to TLS after connecting.
    Required,
    /// Connect over TLS from the start.
    Always,
}

impl Encryption {
    /// Numeric code (`HTTP_ENCRYPT_*`).
    pub fn code(self) -> i32 {
        match self {
            Self::IfRequested => 0,
            Self::Never => 1,
            Self::Required => 2,
            Self::Always => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::IfRequested),
            1 => Some(Self::Never),
            2 => Some(Self::Required),
            3 => Some(Self::Always),
            _ => None,
        }
    }
}

impl fmt::Display for Encryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::IfRequested => "IfRequested",
            Self::Never => "Never",
            Self::Required => "Required",
            Self::Always => "Always",
        };
        f.write_str(name)
    }
}

impl FromStr for Encryption {
    type Err = CupskitError;

    /// Accepts the policy name (any case) or its numeric code.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i32>() {
            return Self::from_code(code)
                .ok_or_else(|| CupskitError::Config(format!("unknown encryption code {code}")));
        }
        match s.to_ascii_lowercase().as_str() {
            "ifrequested" | "if-requested" => Ok(Self::IfRequested),
            "never" => Ok(Self::Never),
            "required" => Ok(Self::Required),
            "always" => Ok(Self::Always),
            _ => Err(CupskitError::Config(format!("unknown encryption policy {s:?}"))),
        }
    }
}

/// Persistent client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// User name to connect as.
    pub user: String,
    /// Print server host name or socket path.
    pub server: String,
    /// IPP port (default 631).
    pub port: u16,
    /// Encryption policy for the HTTP connection.
    pub encryption: Encryption,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user: "unknown".into(),
            server: "localhost".into(),
            port: DEFAULT_PORT,
            encryption: Encryption::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `CUPS_USER`/`USER`, `CUPS_SERVER`, `IPP_PORT`
    /// and `CUPS_ENCRYPTION` from the process environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Overlay environment values obtained through `lookup`. Malformed values
    /// are logged and skipped.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(user) = non_empty("CUPS_USER").or_else(|| non_empty("USER")) {
            self.user = user;
        }
        if let Some(server) = non_empty("CUPS_SERVER") {
            self.server = server;
        }
        if let Some(port) = non_empty("IPP_PORT") {
            match port.trim().parse::<u16>() {
                Ok(p) if p != 0 => self.port = p,
                _ => warn!(value = %port, "ignoring malformed IPP_PORT"),
            }
        }
        if let Some(enc) = non_empty("CUPS_ENCRYPTION") {
            match enc.parse() {
                Ok(e) => self.encryption = e,
                Err(e) => warn!(error = %e, "ignoring malformed CUPS_ENCRYPTION"),
            }
        }
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&data)?;
        debug!(path = %path.display(), "client config loaded");
        Ok(config)
    }

    /// Load settings from `path`, falling back to defaults when the file does
    /// not exist. Other I/O and parse errors are returned.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(CupskitError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no client config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Persist settings as pretty-printed JSON, creating the parent
    /// directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, json)?;
        info!(path = %path.display(), "client config saved");
        Ok(())
    }

    /// Apply explicitly set fields. A zero port is rejected and leaves the
    /// settings unchanged.
    pub fn apply_update(&mut self, update: &ConfigUpdate) -> Result<()> {
        if update.port == Some(0) {
            return Err(CupskitError::Config("port must be between 1 and 65535".into()));
        }
        if let Some(user) = &update.user {
            self.user = user.clone();
        }
        if let Some(server) = &update.server {
            self.server = server.clone();
        }
        if let Some(port) = update.port {
            self.port = port;
        }
        if let Some(encryption) = update.encryption {
            self.encryption = encryption;
        }
        debug!(?update, "client config updated");
        Ok(())
    }
}

/// Settings to change; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub user: Option<String>,
    pub server: Option<String>,
    pub port: Option<u16>,
    pub encryption: Option<Encryption>,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        self.user.is_none()
            && self.server.is_none()
            && self.port.is_none()
            && self.encryption.is_none()
    }
}
