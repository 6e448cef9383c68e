//! Tool server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileTransport {
    /// Newline-delimited JSON-RPC on stdin/stdout
    Stdio,
    /// JSON-RPC over `POST /mcp`
    #[default]
    Http,
    /// `GET /sse` event stream plus `POST /messages`
    Sse,
}

impl fmt::Display for FileTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileTransport::Stdio => write!(f, "stdio"),
            FileTransport::Http => write!(f, "http"),
            FileTransport::Sse => write!(f, "sse"),
        }
    }
}

/// Raw `[server]` configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub transport: FileTransport,
    pub host: String,
    pub port: u16,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            transport: FileTransport::Http,
            host: "localhost".to_string(),
            port: 8000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_section() {
        let config: super::super::FileConfig = toml::from_str(
            r#"
[server]
transport = "stdio"
"#,
        )
        .unwrap();
        assert_eq!(config.server.transport, FileTransport::Stdio);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "localhost");
    }

    #[test]
    fn test_sse_transport() {
        let config: super::super::FileConfig =
            toml::from_str("[server]\ntransport = \"sse\"\nport = 9001\n").unwrap();
        assert_eq!(config.server.transport, FileTransport::Sse);
        assert_eq!(config.server.transport.to_string(), "sse");
        assert_eq!(config.server.port, 9001);
    }
}
