//! SSH transport for live capture.
//!
//! Opens an interactive PTY shell on the device and drives it on a private
//! current-thread runtime, so callers stay synchronous.

use super::session::{clean_command_output, ends_with_prompt, DeviceSession};
use crate::utils::config::{
    PTY_COLUMNS, PTY_ROWS, PTY_TERMINAL, SSH_KEEPALIVE_INTERVAL, TIMING_QUIET_PERIOD,
};
use crate::utils::error::AcquireError;
use log::{debug, info};
use russh::client::{self, Handle, Msg};
use russh::keys::ssh_key::PublicKey;
use russh::{Channel, ChannelMsg, Disconnect};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tokio::time::{timeout, Instant};

/// Bytes at the end of the buffer inspected for the prompt
const PROMPT_TAIL_BYTES: usize = 256;

/// Where and how to log in
#[derive(Debug, Clone)]
pub struct SshTarget {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub connect_timeout: Duration,
    pub command_timeout: Duration,
    pub capture_window: Duration,
}

impl SshTarget {
    /// Idle time after which russh drops the session
    ///
    /// Must outlast the capture window, during which nothing is sent.
    pub fn inactivity_timeout(&self) -> Duration {
        self.capture_window + self.command_timeout * 2
    }
}

struct DeviceHandler;

impl client::Handler for DeviceHandler {
    type Error = russh::Error;

    // TODO: check the key against ~/.ssh/known_hosts instead of accepting any
    async fn check_server_key(&mut self, _server_public_key: &PublicKey) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// Interactive shell session on a device
pub struct SshSession {
    runtime: Runtime,
    handle: Handle<DeviceHandler>,
    channel: Channel<Msg>,
    command_timeout: Duration,
}

impl SshSession {
    /// Connect, authenticate with a password and wait for the first prompt
    ///
    /// # Errors
    /// * `AcquireError::Timeout` - no connection within `connect_timeout`
    /// * `AcquireError::ConnectFailed` - TCP or SSH handshake failure
    /// * `AcquireError::AuthenticationFailed` - credentials rejected
    /// * `AcquireError::Session` - shell could not be opened
    pub fn connect(target: &SshTarget) -> Result<Self, AcquireError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AcquireError::Session(format!("Failed to start runtime: {}", e)))?;

        info!("Connecting to {}:{} as {}", target.host, target.port, target.username);
        let (handle, channel) = runtime.block_on(open_shell(target))?;

        Ok(Self {
            runtime,
            handle,
            channel,
            command_timeout: target.command_timeout,
        })
    }
}

impl DeviceSession for SshSession {
    fn send_command(&mut self, command: &str) -> Result<String, AcquireError> {
        let limit = self.command_timeout;
        let channel = &mut self.channel;

        let raw = self.runtime.block_on(async {
            send_line(channel, command).await?;
            read_until_prompt(channel, limit, command).await
        })?;

        Ok(clean_command_output(&raw, command))
    }

    fn send_command_timing(&mut self, command: &str) -> Result<String, AcquireError> {
        let limit = self.command_timeout;
        let channel = &mut self.channel;

        let raw = self.runtime.block_on(async {
            send_line(channel, command).await?;
            read_until_quiet(channel, TIMING_QUIET_PERIOD, limit).await
        })?;

        Ok(clean_command_output(&raw, command))
    }

    fn wait_for_capture(&mut self, window: Duration) {
        // Keep the russh session task running while the device traces
        self.runtime.block_on(tokio::time::sleep(window));
    }

    fn disconnect(&mut self) -> Result<(), AcquireError> {
        let channel = &self.channel;
        let handle = &self.handle;

        self.runtime.block_on(async {
            // The device may already have closed the channel
            let _ = channel.eof().await;
            handle
                .disconnect(Disconnect::ByApplication, "", "en")
                .await
                .map_err(session_error)
        })
    }
}

async fn open_shell(
    target: &SshTarget,
) -> Result<(Handle<DeviceHandler>, Channel<Msg>), AcquireError> {
    let config = Arc::new(client::Config {
        inactivity_timeout: Some(target.inactivity_timeout()),
        keepalive_interval: Some(SSH_KEEPALIVE_INTERVAL),
        ..Default::default()
    });

    let mut handle = timeout(
        target.connect_timeout,
        client::connect(config, (target.host.as_str(), target.port), DeviceHandler),
    )
    .await
    .map_err(|_| AcquireError::Timeout {
        operation: format!("connection to {}", target.host),
        seconds: target.connect_timeout.as_secs(),
    })?
    .map_err(|e| AcquireError::ConnectFailed {
        host: target.host.clone(),
        reason: e.to_string(),
    })?;

    let auth = handle
        .authenticate_password(target.username.clone(), target.password.clone())
        .await
        .map_err(session_error)?;

    if !auth.success() {
        return Err(AcquireError::AuthenticationFailed(target.username.clone()));
    }

    let mut channel = handle.channel_open_session().await.map_err(session_error)?;
    channel
        .request_pty(false, PTY_TERMINAL, PTY_COLUMNS, PTY_ROWS, 0, 0, &[])
        .await
        .map_err(session_error)?;
    channel.request_shell(false).await.map_err(session_error)?;

    let banner = read_until_prompt(&mut channel, target.command_timeout, "login prompt").await?;
    debug!("Login banner: {} bytes", banner.len());

    Ok((handle, channel))
}

async fn send_line(channel: &mut Channel<Msg>, command: &str) -> Result<(), AcquireError> {
    let line = format!("{}\n", command);
    channel.data(line.as_bytes()).await.map_err(session_error)
}

async fn read_until_prompt(
    channel: &mut Channel<Msg>,
    limit: Duration,
    operation: &str,
) -> Result<String, AcquireError> {
    let deadline = Instant::now() + limit;
    let mut buffer: Vec<u8> = Vec::new();

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());

        match timeout(remaining, channel.wait()).await {
            Ok(Some(ChannelMsg::Data { data })) => {
                buffer.extend_from_slice(&data);
                let tail = &buffer[buffer.len().saturating_sub(PROMPT_TAIL_BYTES)..];
                if ends_with_prompt(&String::from_utf8_lossy(tail)) {
                    break;
                }
            }
            Ok(Some(ChannelMsg::Eof | ChannelMsg::Close)) | Ok(None) => {
                return Err(AcquireError::Session(format!(
                    "Device closed the session during {}",
                    operation
                )));
            }
            Ok(Some(_)) => {}
            Err(_) => {
                return Err(AcquireError::Timeout {
                    operation: operation.to_string(),
                    seconds: limit.as_secs(),
                });
            }
        }
    }

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

async fn read_until_quiet(
    channel: &mut Channel<Msg>,
    quiet: Duration,
    limit: Duration,
) -> Result<String, AcquireError> {
    let deadline = Instant::now() + limit;
    let mut buffer: Vec<u8> = Vec::new();

    while Instant::now() < deadline {
        let wait = quiet.min(deadline.saturating_duration_since(Instant::now()));

        match timeout(wait, channel.wait()).await {
            Ok(Some(ChannelMsg::Data { data })) => buffer.extend_from_slice(&data),
            Ok(Some(ChannelMsg::Eof | ChannelMsg::Close)) | Ok(None) => break,
            Ok(Some(_)) => {}
            Err(_) => break,
        }
    }

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn session_error(e: russh::Error) -> AcquireError {
    AcquireError::Session(e.to_string())
}
