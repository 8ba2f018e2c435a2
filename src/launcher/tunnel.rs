use log::{error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use crate::app_config::TunnelConfig;
use crate::errors::LauncherError;
use crate::file_utils::FileManager;
use crate::launcher::{shell_command, shell_quote};

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

/// Result of polling the tunnel logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TunnelOutcome {
    /// The public URL announced by the tunnel
    Url(String),
    /// The tunnel wrote output, but no line carried the URL marker
    NoUrl { output: Vec<String> },
    /// The tunnel wrote to its error log first
    Failed { errors: Vec<String> },
}

impl TunnelOutcome {
    pub fn url(&self) -> Option<&str> {
        match self {
            TunnelOutcome::Url(url) => Some(url.as_str()),
            _ => None,
        }
    }
}

/// `nohup <command> --port <port> > out 2> err &`
pub fn tunnel_command_line(config: &TunnelConfig) -> String {
    format!(
        "nohup {} --port {} > {} 2> {} &",
        config.command,
        config.port,
        shell_quote(&config.stdout_log.to_string_lossy()),
        shell_quote(&config.stderr_log.to_string_lossy()),
    )
}

/// Find the URL on the last line carrying `marker`
///
/// The URL is the text following the marker; when that text contains an
/// http(s) URL only the URL itself is returned. Earlier marker lines are
/// ignored even when the last one has nothing after the marker.
pub fn find_url(output: &str, marker: &str) -> Option<String> {
    let remainder = output.lines()
        .filter_map(|line| line.split(marker).nth(1))
        .last()?
        .trim();

    if remainder.is_empty() {
        return None;
    }

    match URL_PATTERN.find(remainder) {
        Some(found) => Some(found.as_str().to_string()),
        None => Some(remainder.to_string()),
    }
}

fn read_log(path: &Path) -> Result<String, LauncherError> {
    let bytes = fs::read(path)
        .map_err(|source| LauncherError::LogFile { path: path.to_path_buf(), source })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Start the tunnel in the background with its output sent to the log files
///
/// Both logs are truncated first so output from an earlier run is not
/// mistaken for the new tunnel's.
pub async fn start_tunnel(config: &TunnelConfig) -> Result<(), LauncherError> {
    for log_path in [&config.stdout_log, &config.stderr_log] {
        fs::write(log_path, b"")
            .map_err(|source| LauncherError::LogFile { path: log_path.clone(), source })?;
    }

    let command_line = tunnel_command_line(config);
    info!("{}", command_line);

    let status = shell_command(&command_line)
        .status()
        .await
        .map_err(|source| LauncherError::Spawn { command: command_line.clone(), source })?;

    if !status.success() {
        warn!("Tunnel shell exited with {}", status);
    }

    Ok(())
}

/// Poll the tunnel logs until one of them has content
///
/// Waits `startup_delay` first, then checks the stdout log before the stderr
/// log every `poll_interval`. There is no overall timeout.
pub async fn wait_for_url(config: &TunnelConfig) -> Result<TunnelOutcome, LauncherError> {
    info!("Waiting for {} init...", config.command);
    tokio::time::sleep(config.startup_delay()).await;

    loop {
        if FileManager::file_size(&config.stdout_log) > 0 {
            let output = read_log(&config.stdout_log)?;
            return Ok(match find_url(&output, &config.url_marker) {
                Some(url) => {
                    info!("Public URL: {}", url);
                    TunnelOutcome::Url(url)
                }
                None => {
                    warn!("Tunnel output has no line containing '{}'", config.url_marker.trim());
                    TunnelOutcome::NoUrl {
                        output: output.lines().map(str::to_string).collect(),
                    }
                }
            });
        }

        if FileManager::file_size(&config.stderr_log) > 0 {
            let errors: Vec<String> = read_log(&config.stderr_log)?
                .lines()
                .map(str::to_string)
                .collect();
            for line in &errors {
                error!("{}", line);
            }
            return Ok(TunnelOutcome::Failed { errors });
        }

        tokio::time::sleep(config.poll_interval()).await;
    }
}
