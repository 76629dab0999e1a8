//! Driver registry.
//!
//! Maps driver names (the scheme part of a connection URI) to factories that
//! build a [`Driver`] from a [`Config`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;
use tracing::Instrument;

use crate::config::Config;
use crate::connection::Connection;
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::instrumentation::span_names;

/// Builds a driver for a configuration.
pub type DriverFactory = Arc<dyn Fn(&Config) -> Result<Box<dyn Driver>> + Send + Sync>;

#[allow(clippy::expect_used)]
static DRIVER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*$").expect("driver name pattern is valid"));

/// A set of named driver factories.
///
/// Registries are cheap to clone; clones share the same drivers.
#[derive(Clone, Default)]
pub struct Registry {
    drivers: Arc<RwLock<HashMap<String, DriverFactory>>>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a driver factory under `name`, replacing any previous one.
    ///
    /// Names are case-insensitive and must be valid URI schemes.
    pub fn register<F>(&self, name: &str, factory: F) -> Result<()>
    where
        F: Fn(&Config) -> Result<Box<dyn Driver>> + Send + Sync + 'static,
    {
        let name = normalize_name(name)?;
        let replaced = self.drivers.write().insert(name.clone(), Arc::new(factory)).is_some();
        if replaced {
            tracing::warn!(driver = %name, "replacing registered driver");
        } else {
            tracing::debug!(driver = %name, "registered driver");
        }
        Ok(())
    }

    /// Remove a driver. Returns whether it was registered.
    pub fn unregister(&self, name: &str) -> bool {
        self.drivers.write().remove(&name.to_ascii_lowercase()).is_some()
    }

    /// Check if a driver is registered.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.drivers.read().contains_key(&name.to_ascii_lowercase())
    }

    /// Names of all registered drivers, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.drivers.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Parse `uri` and open a connection with the driver its scheme names.
    pub async fn connect(&self, uri: &str) -> Result<Connection> {
        self.connect_with(Config::from_uri(uri)?).await
    }

    /// Open a connection for an already-built configuration.
    pub async fn connect_with(&self, config: Config) -> Result<Connection> {
        let name = config.driver.to_ascii_lowercase();
        let factory = self
            .drivers
            .read()
            .get(&name)
            .cloned()
            .ok_or_else(|| Error::UnknownDriver(config.driver.clone()))?;

        let driver = factory(&config)?;
        let span = tracing::debug_span!(
            span_names::CONNECT,
            db.system = %name,
            db.name = config.database.as_deref().unwrap_or_default(),
        );

        let mut connection = Connection::new(config, driver);
        if !connection.open().instrument(span).await? {
            tracing::error!(driver = %name, "driver failed to open connection");
            return Err(Error::OpenFailed { driver: name });
        }
        Ok(connection)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("drivers", &self.names()).finish()
    }
}

fn normalize_name(name: &str) -> Result<String> {
    if DRIVER_NAME.is_match(name) {
        Ok(name.to_ascii_lowercase())
    } else {
        Err(Error::InvalidDriverName(name.to_string()))
    }
}
