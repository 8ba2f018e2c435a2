use log::{info, warn};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Child;

use crate::app_config::LauncherConfig;
use crate::errors::LauncherError;
use crate::launcher::{shell_command, shell_quote};

/// How the wait for the readiness line ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerStatus {
    /// A line containing the readiness marker was seen
    Ready { line: String },
    /// The server printed an empty line before the marker
    BlankLine,
    /// The server exited before the marker appeared
    OutputClosed,
}

/// Reads complete lines from a log file another process is still writing
#[derive(Debug)]
struct LogFollower {
    reader: BufReader<tokio::fs::File>,
    pending: Vec<u8>,
    poll_interval: Duration,
}

impl LogFollower {
    async fn open(path: &Path, poll_interval: Duration) -> Result<Self, LauncherError> {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|source| LauncherError::LogFile { path: path.to_path_buf(), source })?;

        Ok(Self { reader: BufReader::new(file), pending: Vec::new(), poll_interval })
    }

    /// Next line, trimmed, with invalid UTF-8 replaced
    ///
    /// Returns `None` once `child` has exited and everything it wrote has
    /// been read. A last line without a newline is only returned then.
    async fn next_line(&mut self, child: &mut Child) -> Result<Option<String>, LauncherError> {
        let mut exited = false;

        loop {
            let read = self.reader.read_until(b'\n', &mut self.pending).await?;
            if self.pending.last() == Some(&b'\n') {
                return Ok(Some(self.take_line()));
            }
            if read > 0 {
                continue;
            }

            if exited {
                if self.pending.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(self.take_line()));
            }

            // Read once more after the exit so nothing written just before it is lost
            if child.try_wait()?.is_some() {
                exited = true;
                continue;
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    fn take_line(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.pending).trim().to_string();
        self.pending.clear();
        line
    }
}

/// A started server process and its output log
#[derive(Debug)]
pub struct ServerHandle {
    child: Child,
    pid: u32,
    log_path: PathBuf,
    output: LogFollower,
    status: ServerStatus,
}

impl ServerHandle {
    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn status(&self) -> &ServerStatus {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.status, ServerStatus::Ready { .. })
    }

    /// The server has already exited
    pub fn has_exited(&self) -> bool {
        self.status == ServerStatus::OutputClosed
    }

    /// Forward the remaining output to the log and wait for the process to exit
    pub async fn wait(mut self) -> Result<ExitStatus, LauncherError> {
        while let Some(line) = self.output.next_line(&mut self.child).await? {
            if !line.is_empty() {
                info!("{}", line);
            }
        }

        Ok(self.child.wait().await?)
    }

    /// Stop following the server and leave it running
    ///
    /// The server keeps writing to its log file, so it is unaffected when
    /// this process exits.
    pub fn detach(self) -> u32 {
        info!("Server {} left running, output in {:?}", self.pid, self.log_path);
        self.pid
    }
}

/// Server command line: configured command, configured args, then `extra_args`
pub fn server_command_line(config: &LauncherConfig, extra_args: &[String]) -> String {
    let mut parts = vec![config.server_command.clone()];
    parts.extend(config.server_args.iter().chain(extra_args).map(|arg| shell_quote(arg)));
    parts.join(" ")
}

/// Truncate the server log and return a handle for stdout and one for stderr
fn open_server_log(path: &Path) -> Result<(File, File), LauncherError> {
    let log_error = |source| LauncherError::LogFile { path: path.to_path_buf(), source };
    let stdout = File::create(path).map_err(log_error)?;
    let stderr = stdout.try_clone().map_err(log_error)?;
    Ok((stdout, stderr))
}

/// Start the server and echo its output until it reports readiness
///
/// Stdout and stderr both go to `server_log`, which is followed line by
/// line. The wait ends at the first line containing the marker, at the
/// first empty line, or when the server exits. It blocks for as long as
/// the server keeps printing other lines.
pub async fn start_server(config: &LauncherConfig, extra_args: &[String]) -> Result<ServerHandle, LauncherError> {
    let command_line = server_command_line(config, extra_args);
    info!("{}", command_line);

    let (stdout, stderr) = open_server_log(&config.server_log)?;
    let mut child = shell_command(&command_line)
        .current_dir(&config.working_dir)
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .spawn()
        .map_err(|source| LauncherError::Spawn { command: command_line.clone(), source })?;

    let pid = child.id().unwrap_or_default();
    info!("processId: {}", pid);

    let mut output = LogFollower::open(&config.server_log, config.poll_interval()).await?;

    let status = loop {
        match output.next_line(&mut child).await? {
            Some(line) if line.contains(&config.ready_marker) => {
                info!("{}", line);
                break ServerStatus::Ready { line };
            }
            Some(line) if line.is_empty() => {
                warn!("Server printed an empty line before '{}', not waiting any longer", config.ready_marker.trim());
                break ServerStatus::BlankLine;
            }
            Some(line) => info!("{}", line),
            None => {
                warn!("Server exited before '{}' was printed", config.ready_marker.trim());
                break ServerStatus::OutputClosed;
            }
        }
    };

    Ok(ServerHandle { child, pid, log_path: config.server_log.clone(), output, status })
}
