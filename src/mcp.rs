//! Client for the documentation tool chain: a child process speaking
//! newline-delimited JSON-RPC 2.0 (Model Context Protocol) over stdio.

use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

const PROTOCOL_VERSION: &str = "2024-11-05";
const CLIENT_NAME: &str = "dev-dashboard";

pub const DEFAULT_MCP_COMMAND: &str = "npx -y @upstash/context7-mcp";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Program and arguments used to start the tool chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolChainCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolChainCommand {
    /// Whitespace-separated command line; blank disables the tool chain
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Serialize)]
struct RpcNotification<'a> {
    jsonrpc: &'static str,
    method: &'a str,
}

#[derive(Debug, Deserialize)]
struct RpcMessage {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// A running tool-chain process after the initialize handshake
struct McpSession {
    _child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    next_id: u64,
    broken: bool,
}

impl McpSession {
    async fn start(command: &ToolChainCommand, request_timeout: Duration) -> Result<Self> {
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DashboardError::ToolChainUnavailable(format!(
                    "failed to start `{}`: {}",
                    command.program, e
                ))
            })?;

        let (stdin, stdout) = match (child.stdin.take(), child.stdout.take()) {
            (Some(stdin), Some(stdout)) => (stdin, stdout),
            _ => {
                return Err(DashboardError::ToolChainUnavailable(
                    "tool chain stdio was not captured".to_string(),
                ))
            }
        };

        let mut session = McpSession {
            _child: child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            next_id: 1,
            broken: false,
        };

        let handshake = async {
            session
                .request(
                    "initialize",
                    json!({
                        "protocolVersion": PROTOCOL_VERSION,
                        "capabilities": {},
                        "clientInfo": {
                            "name": CLIENT_NAME,
                            "version": env!("CARGO_PKG_VERSION"),
                        },
                    }),
                )
                .await?;

            session
                .send(&RpcNotification {
                    jsonrpc: "2.0",
                    method: "notifications/initialized",
                })
                .await
        };

        match tokio::time::timeout(request_timeout, handshake).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(DashboardError::ToolChainUnavailable(format!(
                    "handshake failed: {}",
                    e
                )))
            }
            Err(_) => {
                return Err(DashboardError::ToolChainUnavailable(format!(
                    "handshake timed out after {:?}",
                    request_timeout
                )))
            }
        }

        Ok(session)
    }

    async fn send<T: Serialize>(&mut self, message: &T) -> Result<()> {
        let mut line = serde_json::to_vec(message)?;
        line.push(b'\n');

        let written = async {
            self.stdin.write_all(&line).await?;
            self.stdin.flush().await
        }
        .await;

        written.map_err(|e| {
            self.broken = true;
            DashboardError::ToolCallError(format!("tool chain I/O failed: {}", e))
        })
    }

    async fn request(&mut self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id;
        self.next_id += 1;

        self.send(&RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        })
        .await?;

        loop {
            let line = match self.stdout.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.broken = true;
                    return Err(DashboardError::ToolCallError(
                        "tool chain closed its output".to_string(),
                    ));
                }
                Err(e) => {
                    self.broken = true;
                    return Err(DashboardError::ToolCallError(format!(
                        "tool chain I/O failed: {}",
                        e
                    )));
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let message: RpcMessage = match serde_json::from_str(line) {
                Ok(message) => message,
                Err(_) => {
                    debug!("Skipping non JSON-RPC line from tool chain");
                    continue;
                }
            };

            // Notifications and server-initiated requests are not ours
            if message.method.is_some() || message.id.as_ref().and_then(Value::as_u64) != Some(id) {
                continue;
            }

            if let Some(err) = message.error {
                return Err(DashboardError::ToolCallError(format!(
                    "{} (code {})",
                    err.message, err.code
                )));
            }

            return Ok(message.result.unwrap_or(Value::Null));
        }
    }
}

/// Lazily started, shared tool-chain process. Calls are serialized and
/// each one, including the handshake, is bounded by `request_timeout`.
pub struct ToolChain {
    command: Option<ToolChainCommand>,
    request_timeout: Duration,
    session: Mutex<Option<McpSession>>,
    // Readable without waiting on a call in flight
    connected: AtomicBool,
}

impl ToolChain {
    pub fn new(command: Option<ToolChainCommand>, request_timeout: Duration) -> Self {
        Self {
            command,
            request_timeout,
            session: Mutex::new(None),
            connected: AtomicBool::new(false),
        }
    }

    pub fn disabled() -> Self {
        Self::new(None, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn is_enabled(&self) -> bool {
        self.command.is_some()
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Start the process ahead of the first call
    pub async fn connect(&self) -> Result<()> {
        let mut guard = self.session.lock().await;
        if guard.is_none() {
            *guard = Some(self.start_session().await?);
            self.connected.store(true, Ordering::Release);
        }
        Ok(())
    }

    pub async fn list_tools(&self) -> Result<Value> {
        self.request("tools/list", json!({})).await
    }

    pub async fn call_tool(&self, name: &str, args: Value) -> Result<Value> {
        info!(tool = %name, "Calling documentation tool");
        self.request("tools/call", json!({ "name": name, "arguments": args }))
            .await
    }

    async fn start_session(&self) -> Result<McpSession> {
        let command = self.command.as_ref().ok_or_else(|| {
            DashboardError::ToolChainUnavailable("MCP client unavailable".to_string())
        })?;

        match McpSession::start(command, self.request_timeout).await {
            Ok(session) => {
                info!(program = %command.program, "Connected to documentation tool chain");
                Ok(session)
            }
            Err(e) => {
                error!(program = %command.program, "Failed to connect to tool chain: {}", e);
                Err(e)
            }
        }
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let mut guard = self.session.lock().await;
        if guard.is_none() {
            *guard = Some(self.start_session().await?);
            self.connected.store(true, Ordering::Release);
        }

        let Some(session) = guard.as_mut() else {
            return Err(DashboardError::ToolChainUnavailable(
                "MCP client unavailable".to_string(),
            ));
        };

        let outcome =
            tokio::time::timeout(self.request_timeout, session.request(method, params)).await;
        let result = match outcome {
            Ok(result) => result,
            Err(_) => {
                // A late answer would desynchronize the stream
                session.broken = true;
                Err(DashboardError::ToolCallError(format!(
                    "tool chain did not answer {} within {:?}",
                    method, self.request_timeout
                )))
            }
        };

        if session.broken {
            warn!("Tool chain connection lost; it will be restarted on the next call");
            *guard = None;
            self.connected.store(false, Ordering::Release);
        }
        result
    }
}
