pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod health;
pub mod llm;
pub mod mcp;
pub mod models;
pub mod normalizer;
pub mod queries;
pub mod server;
pub mod stats;
pub mod types;
pub mod upstream;
