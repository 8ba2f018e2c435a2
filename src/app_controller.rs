use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::i18n::{self, ExtractOptions, KeyMap, ReconcileReport, TranslationTarget};
use crate::language_utils;
use crate::launcher::{self, ServerHandle, TunnelOutcome};
use crate::providers::Translator;

// @module: Application controller for the launcher and i18n commands

/// A started server, plus the tunnel result when a tunnel was requested
#[derive(Debug)]
pub struct Launch {
    pub server: ServerHandle,
    pub tunnel: Option<TunnelOutcome>,
}

impl Launch {
    pub fn public_url(&self) -> Option<&str> {
        self.tunnel.as_ref().and_then(|t| t.url())
    }
}

/// Outcome of reconciling one dictionary file
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: Result<ReconcileReport>,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Arguments for the server: the configured preset's args, then `extra_args`
    pub fn server_args(&self, extra_args: &[String]) -> Result<Vec<String>> {
        let launcher_config = &self.config.launcher;
        let mut args = Vec::new();

        if let Some(label) = &launcher_config.model_preset {
            let presets = launcher::model_presets(&launcher_config.model_version);
            let preset = presets.get(label)
                .ok_or_else(|| anyhow!("Unknown model preset: '{}'", label))?;
            info!("Using model preset '{}': {}", label, preset);
            args.extend(preset.args());
        }

        args.extend_from_slice(extra_args);
        Ok(args)
    }

    /// Start the server, wait for it to be ready, then open the tunnel
    ///
    /// The tunnel is skipped when `skip_tunnel` is set or when the server
    /// exited before it reported readiness. A server that stopped the wait
    /// with an empty line is still running, so it gets its tunnel.
    pub async fn run_launch(&self, extra_args: &[String], skip_tunnel: bool) -> Result<Launch> {
        let start_time = Instant::now();
        let args = self.server_args(extra_args)?;

        let server = launcher::start_server(&self.config.launcher, &args)
            .await
            .context("Failed to start the server")?;

        if server.has_exited() {
            warn!("Server exited before reporting readiness, not starting the tunnel");
            return Ok(Launch { server, tunnel: None });
        }

        if server.is_ready() {
            info!("Server ready after {}", Self::format_duration(start_time.elapsed()));
        } else {
            warn!("Server readiness unknown after {}", Self::format_duration(start_time.elapsed()));
        }

        if skip_tunnel {
            return Ok(Launch { server, tunnel: None });
        }

        let tunnel_config = &self.config.launcher.tunnel;
        launcher::start_tunnel(tunnel_config)
            .await
            .context("Failed to start the tunnel")?;

        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(format!("Waiting for {} on port {}", tunnel_config.command, tunnel_config.port));
        spinner.enable_steady_tick(Duration::from_millis(120));

        let outcome = launcher::wait_for_url(tunnel_config).await;
        spinner.finish_and_clear();

        Ok(Launch { server, tunnel: Some(outcome?) })
    }

    /// Extraction settings from the configuration
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions::from(&self.config.i18n)
    }

    /// Extract the key mapping from the configured markup root, or `root`
    pub fn extract_keys(&self, root: Option<&Path>) -> Result<KeyMap> {
        let root = root.unwrap_or(self.config.i18n.root_dir.as_path());
        let keys = i18n::extract_directory(root, &self.extract_options())
            .with_context(|| format!("Failed to extract keys from {:?}", root))?;
        Ok(keys)
    }

    /// Target language of a dictionary: configured, else derived from its file name
    pub fn target_language_for(&self, dictionary: &Path) -> Result<String> {
        if let Some(target) = &self.config.translation.target_language {
            return language_utils::normalize_locale(target);
        }

        language_utils::locale_from_path(dictionary)
            .ok_or_else(|| anyhow!("Cannot determine the target language of {:?}; set translation.target_language", dictionary))
    }

    /// Merge-and-translate each dictionary against the keys under `root`
    ///
    /// A failure on one dictionary is logged and recorded; the others are
    /// still processed.
    pub async fn run_sync(
        &self,
        translator: &dyn Translator,
        root: Option<&Path>,
        dictionaries: &[PathBuf],
        dry_run: bool,
    ) -> Result<Vec<FileReport>> {
        let start_time = Instant::now();
        let keys = self.extract_keys(root)?;
        let source_language = language_utils::normalize_locale(&self.config.i18n.source_language)?;

        let mut reports = Vec::with_capacity(dictionaries.len());
        for path in dictionaries {
            let result = match self.target_language_for(path) {
                Ok(target_language) => {
                    info!("Syncing {:?} ({} -> {}) using {}", path, source_language, target_language, translator.name());
                    let target = TranslationTarget {
                        translator,
                        source_language: &source_language,
                        target_language: &target_language,
                    };
                    i18n::sync_file(path, &keys, target, dry_run).await.map_err(anyhow::Error::from)
                }
                Err(e) => Err(e),
            };

            Self::log_result(path, &result);
            reports.push(FileReport { path: path.clone(), result });
        }

        info!("Sync finished in {}", Self::format_duration(start_time.elapsed()));
        Ok(reports)
    }

    /// Blank-reset each dictionary against the keys under `root`
    pub fn run_reset(&self, root: Option<&Path>, dictionaries: &[PathBuf], dry_run: bool) -> Result<Vec<FileReport>> {
        let keys = self.extract_keys(root)?;

        let reports = dictionaries.iter()
            .map(|path| {
                let result = i18n::reset_file(path, &keys, dry_run).map_err(anyhow::Error::from);
                Self::log_result(path, &result);
                FileReport { path: path.clone(), result }
            })
            .collect();

        Ok(reports)
    }

    fn log_result(path: &Path, result: &Result<ReconcileReport>) {
        match result {
            Ok(report) if report.translation_error.is_some() => warn!(
                "{:?}: added {}, removed {}, {} key(s) left untranslated",
                path, report.added.len(), report.removed.len(), report.skipped
            ),
            Ok(report) => info!(
                "{:?}: added {}, removed {}, updated {}, blanked {}",
                path, report.added.len(), report.removed.len(), report.updated, report.blanked
            ),
            Err(e) => error!("{:?}: {:#}", path, e),
        }
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
