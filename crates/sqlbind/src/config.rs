use crate::error::QueryResult;
use crate::zone::DateZone;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-builder execution options.
///
/// Defaults: asynchronous dispatch, casting enabled, text as strings,
/// process-local date zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Offload the blocking connection call to a worker thread
    /// (only consulted by `execute_async`).
    #[serde(rename = "async")]
    pub async_mode: bool,
    /// Cast cells according to their column type. When disabled every
    /// non-null cell is returned as text.
    pub cast: bool,
    /// Return TEXT columns as bytes even when not flagged binary.
    pub buffer_text: bool,
    /// Zone for date literals and DATE/DATETIME casts.
    pub date_zone: DateZone,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            async_mode: true,
            cast: true,
            buffer_text: false,
            date_zone: DateZone::Local,
        }
    }
}

impl QueryOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether `execute_async` offloads to a worker.
    pub fn async_mode(mut self, enabled: bool) -> Self {
        self.async_mode = enabled;
        self
    }

    /// Set whether cells are cast by column type.
    pub fn cast(mut self, enabled: bool) -> Self {
        self.cast = enabled;
        self
    }

    /// Set whether TEXT columns are returned as bytes.
    pub fn buffer_text(mut self, enabled: bool) -> Self {
        self.buffer_text = enabled;
        self
    }

    /// Set the zone for date literals and casts.
    pub fn date_zone(mut self, zone: DateZone) -> Self {
        self.date_zone = zone;
        self
    }
}

/// Connection settings handed to the driver before opening.
///
/// Every field is optional; unset fields keep the driver's current value.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionOptions {
    pub hostname: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub port: Option<u16>,
}

impl ConnectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Parse options from a TOML document.
    ///
    /// ```toml
    /// hostname = "localhost"
    /// user = "app"
    /// database = "shop"
    /// port = 3306
    /// ```
    pub fn from_toml_str(s: &str) -> QueryResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Overlay `other` onto `self`: fields set in `other` win.
    pub fn merge(mut self, other: &ConnectionOptions) -> Self {
        if other.hostname.is_some() {
            self.hostname = other.hostname.clone();
        }
        if other.user.is_some() {
            self.user = other.user.clone();
        }
        if other.password.is_some() {
            self.password = other.password.clone();
        }
        if other.database.is_some() {
            self.database = other.database.clone();
        }
        if other.port.is_some() {
            self.port = other.port;
        }
        self
    }
}

impl fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionOptions")
            .field("hostname", &self.hostname)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("database", &self.database)
            .field("port", &self.port)
            .finish()
    }
}
