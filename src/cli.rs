use crate::config::DashboardConfig;
use crate::credentials::{CommandProvider, EnvProvider, ProviderChain};
use crate::mcp::ToolChainCommand;
use crate::queries::QueryDocuments;
use crate::stats::Endpoints;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "dev-dashboard")]
#[command(about = "Developer Dashboard Server - GitHub and LeetCode stats, docs lookup and local chat")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// GitHub GraphQL endpoint
    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = "https://api.github.com/graphql")]
    pub github_graphql_url: Url,

    /// LeetCode GraphQL endpoint
    #[arg(long, env = "LEETCODE_GRAPHQL_URL", default_value = "https://leetcode.com/graphql")]
    pub leetcode_graphql_url: Url,

    /// GraphQL document for the per-user GitHub query
    #[arg(long, env = "GITHUB_QUERY", default_value = "queries/github_user.graphql")]
    pub github_query: PathBuf,

    /// GraphQL document for the LeetCode profile query
    #[arg(long, env = "LEETCODE_QUERY", default_value = "queries/leetcode_user.graphql")]
    pub leetcode_query: PathBuf,

    /// Directory with the browser UI
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    pub static_dir: PathBuf,

    /// Command printing a GitHub token; empty to skip
    #[arg(long, env = "CREDENTIAL_HELPER", default_value = "gh auth token")]
    pub credential_helper: String,

    /// Environment variable holding the GitHub token, checked after the helper
    #[arg(long, default_value = "GITHUB_TOKEN")]
    pub token_env: String,

    /// Documentation tool chain command; empty to disable
    #[arg(long, env = "MCP_COMMAND", default_value = "npx -y @upstash/context7-mcp")]
    pub mcp_command: String,

    /// Timeout for the tool chain handshake and each tool call, in seconds
    #[arg(long, env = "MCP_TIMEOUT_SECS", default_value_t = 60)]
    pub mcp_timeout_secs: u64,

    /// Base URL of the local Ollama server
    #[arg(long, env = "OLLAMA_URL", default_value = "http://localhost:11434")]
    pub ollama_url: Url,

    /// Model used for chat
    #[arg(long, env = "OLLAMA_MODEL", default_value = "gemma3:1b")]
    pub ollama_model: String,

    /// Overall timeout for upstream requests, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 30)]
    pub upstream_timeout_secs: u64,

    /// Timeout for chat requests, in seconds
    #[arg(long, env = "CHAT_TIMEOUT_SECS", default_value_t = 300)]
    pub chat_timeout_secs: u64,
}

impl Cli {
    /// Credential lookup order: helper command, then environment variable
    pub fn credential_chain(&self) -> ProviderChain {
        let mut chain = ProviderChain::new();
        if let Some(helper) = CommandProvider::from_command_line(&self.credential_helper) {
            chain = chain.with(helper);
        }
        chain.with(EnvProvider::new(self.token_env.clone()))
    }

    pub fn to_config(&self) -> DashboardConfig {
        DashboardConfig {
            host: self.host.clone(),
            port: self.port,
            endpoints: Endpoints {
                github: self.github_graphql_url.clone(),
                leetcode: self.leetcode_graphql_url.clone(),
            },
            queries: QueryDocuments {
                github_user: self.github_query.clone(),
                leetcode_user: self.leetcode_query.clone(),
            },
            static_dir: self.static_dir.clone(),
            mcp_command: ToolChainCommand::parse(&self.mcp_command),
            mcp_timeout: Duration::from_secs(self.mcp_timeout_secs),
            ollama_url: self.ollama_url.clone(),
            ollama_model: self.ollama_model.clone(),
            upstream_timeout: Duration::from_secs(self.upstream_timeout_secs),
            chat_timeout: Duration::from_secs(self.chat_timeout_secs),
        }
    }
}
