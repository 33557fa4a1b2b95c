use crate::error::{DashboardError, Result};
use crate::llm::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL};
use crate::mcp::{ToolChainCommand, DEFAULT_MCP_COMMAND, DEFAULT_REQUEST_TIMEOUT};
use crate::queries::QueryDocuments;
use crate::stats::Endpoints;
use crate::upstream::{GITHUB_GRAPHQL_URL, LEETCODE_GRAPHQL_URL};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Runtime settings of the server, independent of how they were parsed
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub host: String,
    pub port: u16,
    pub endpoints: Endpoints,
    pub queries: QueryDocuments,
    pub static_dir: PathBuf,
    pub mcp_command: Option<ToolChainCommand>,
    pub mcp_timeout: Duration,
    pub ollama_url: Url,
    pub ollama_model: String,
    pub upstream_timeout: Duration,
    pub chat_timeout: Duration,
}

impl DashboardConfig {
    /// Settings matching the CLI defaults
    pub fn with_defaults() -> Result<Self> {
        Ok(Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            endpoints: Endpoints {
                github: parse_url(GITHUB_GRAPHQL_URL)?,
                leetcode: parse_url(LEETCODE_GRAPHQL_URL)?,
            },
            queries: QueryDocuments::default(),
            static_dir: PathBuf::from("public"),
            mcp_command: ToolChainCommand::parse(DEFAULT_MCP_COMMAND),
            mcp_timeout: DEFAULT_REQUEST_TIMEOUT,
            ollama_url: parse_url(DEFAULT_OLLAMA_URL)?,
            ollama_model: DEFAULT_MODEL.to_string(),
            upstream_timeout: Duration::from_secs(30),
            chat_timeout: Duration::from_secs(300),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| DashboardError::ConfigError(format!("Invalid URL {}: {}", raw, e)))
}
