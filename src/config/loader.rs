//! Configuration loading from disk.
//!
//! Load path: read file → parse TOML → resolve every server context against
//! the top-level context → validated, immutable [`ResolvedConfig`]. No
//! merging happens at connection time.

use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::config::resolve::{merge, BrutalConfig};
use crate::config::schema::StreamConfig;

/// Error type for configuration loading. Any variant aborts the whole
/// load; a partially-resolved configuration is never returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for the schema.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// `cwnd_gain` resolved outside its legal range.
    #[error("invalid value \"{value}\" for \"tcp_brutal.cwnd_gain\" in server \"{context}\", must be between 5 and 80")]
    CwndGainOutOfRange { context: String, value: u32 },

    /// Two server contexts share a name.
    #[error("duplicate server name \"{0}\"")]
    DuplicateServer(String),
}

/// Index of a server context inside a [`ResolvedConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServerId(pub usize);

impl std::fmt::Display for ServerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "srv-{}", self.0)
    }
}

/// One server context with its effective brutal configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedServer {
    /// Server identifier from the config file.
    pub name: String,

    /// Listen address, carried through for the host.
    pub listen: String,

    /// Effective directive values after inheritance and defaults.
    pub brutal: BrutalConfig,
}

/// The whole configuration tree, resolved.
///
/// Built once, single-threaded, at load time; immutable afterwards.
/// Connection handlers share it behind an `Arc` and only read it.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    servers: Vec<ResolvedServer>,
}

impl ResolvedConfig {
    /// Resolve a parsed configuration tree.
    pub fn from_stream_config(config: &StreamConfig) -> Result<Self, ConfigError> {
        let mut servers: Vec<ResolvedServer> = Vec::with_capacity(config.servers.len());

        for server in &config.servers {
            if servers.iter().any(|s| s.name == server.name) {
                return Err(ConfigError::DuplicateServer(server.name.clone()));
            }

            let brutal = merge(&config.tcp_brutal, &server.tcp_brutal, &server.name)?;

            servers.push(ResolvedServer {
                name: server.name.clone(),
                listen: server.listen.clone(),
                brutal,
            });
        }

        Ok(Self { servers })
    }

    /// Parse and resolve from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: StreamConfig = toml::from_str(text)?;
        Self::from_stream_config(&config)
    }

    /// Look up a server context by id.
    pub fn server(&self, id: ServerId) -> Option<&ResolvedServer> {
        self.servers.get(id.0)
    }

    /// Look up a server context by name; the returned id is what the host
    /// attaches to sessions accepted for that server.
    pub fn server_id(&self, name: &str) -> Option<ServerId> {
        self.servers.iter().position(|s| s.name == name).map(ServerId)
    }

    /// Iterate over all server contexts in declaration order.
    pub fn servers(&self) -> impl Iterator<Item = (ServerId, &ResolvedServer)> {
        self.servers
            .iter()
            .enumerate()
            .map(|(index, server)| (ServerId(index), server))
    }

    /// Number of server contexts.
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// True if no server contexts are declared.
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

/// Load and resolve configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ResolvedConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    ResolvedConfig::from_toml_str(&content)
}
