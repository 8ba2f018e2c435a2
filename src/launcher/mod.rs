/*!
 * Backend launcher for notebook environments.
 *
 * - `server`: start the backend server and wait for its readiness line
 * - `tunnel`: start a tunnel and scrape its log for the public URL
 * - `presets`: named model presets turned into server arguments
 */

use std::process::Stdio;
use tokio::process::Command;

pub mod presets;
pub mod server;
pub mod tunnel;

pub use presets::{model_presets, ModelPreset, PresetFactory, PresetTable};
pub use server::{server_command_line, start_server, ServerHandle, ServerStatus};
pub use tunnel::{find_url, start_tunnel, tunnel_command_line, wait_for_url, TunnelOutcome};

/// Build a `sh -c` command for a shell command line
pub(crate) fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line).stdin(Stdio::null());
    command
}

/// Quote a word for `sh` when it contains anything but safe characters
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word.chars().all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));

    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
