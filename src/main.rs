// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use tavernkit::app_config::{self, Config, TranslationProvider};
use tavernkit::app_controller::{Controller, FileReport};
use tavernkit::launcher::{self, TunnelOutcome};
use tavernkit::providers;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Libre,
    #[value(name = "deeplx")]
    DeepLx,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Libre => TranslationProvider::Libre,
            CliTranslationProvider::DeepLx => TranslationProvider::DeepLx,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the extras server and expose it through a tunnel
    Launch(LaunchArgs),

    /// List the model presets and the server arguments they produce
    Presets {
        /// Version applied to every preset (-g)
        #[arg(long)]
        model_version: Option<String>,
    },

    /// Localization key extraction and dictionary sync
    #[command(subcommand)]
    I18n(I18nCommands),

    /// Generate shell completions for tavernkit
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct LaunchArgs {
    /// Model preset label (see `tavernkit presets`)
    #[arg(short, long)]
    preset: Option<String>,

    /// Version applied to the preset (-g)
    #[arg(long)]
    model_version: Option<String>,

    /// Port forwarded by the tunnel
    #[arg(long)]
    port: Option<u16>,

    /// Working directory of the server
    #[arg(short, long)]
    working_dir: Option<PathBuf>,

    /// File receiving the server output
    #[arg(long)]
    server_log: Option<PathBuf>,

    /// Start the server only
    #[arg(long)]
    skip_tunnel: bool,

    /// Exit once the URL is known and leave the server running
    #[arg(long)]
    detach: bool,

    /// Extra arguments passed to the server
    #[arg(last = true, value_name = "SERVER_ARGS")]
    server_args: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum I18nCommands {
    /// Print the extracted key mapping as JSON
    Extract {
        /// Directory scanned for markup files
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// Add missing keys (machine translated) and remove stale keys
    Sync(SyncArgs),

    /// Rewrite every dictionary value to the extracted text or ""
    Reset {
        /// Directory scanned for markup files
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Dictionary file to rewrite (repeatable)
        #[arg(short, long)]
        dictionary: Vec<PathBuf>,

        /// Report changes without writing files
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Parser, Debug)]
struct SyncArgs {
    /// Directory scanned for markup files
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Dictionary file to update (repeatable)
    #[arg(short, long)]
    dictionary: Vec<PathBuf>,

    /// Target language (e.g. 'zh-CN'); derived from the file name when omitted
    #[arg(short, long = "target")]
    target_language: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Endpoint URL of the translation provider
    #[arg(long)]
    endpoint: Option<String>,

    /// Report changes without writing files
    #[arg(long)]
    dry_run: bool,
}

/// tavernkit - helper utilities for the chat front-end and its extras backend
#[derive(Parser, Debug)]
#[command(name = "tavernkit")]
#[command(version)]
#[command(about = "Extras launcher and localization key tools")]
#[command(long_about = "tavernkit starts the extras server behind a tunnel and keeps locale dictionaries in sync with the HTML.

EXAMPLES:
    tavernkit launch -p 'Pygmalion 6B'              # Start the server with a model preset
    tavernkit launch --skip-tunnel -- --cpu         # Pass extra arguments to the server
    tavernkit presets                               # List model presets
    tavernkit i18n extract                          # Print keys found under ./public
    tavernkit i18n sync -d public/locales/ja.json   # Add/remove keys, translating new ones
    tavernkit i18n reset --dry-run                  # Preview a blank-reset of en.json
    tavernkit completions bash > tavernkit.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI colour for log level
    fn decoration_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, colour) = Self::decoration_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                colour, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set via set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "tavernkit", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;

    match &cli.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    match cli.command {
        Commands::Launch(args) => run_launch(config, args).await,
        Commands::Presets { model_version } => {
            let version = model_version.unwrap_or(config.launcher.model_version);
            run_presets(&version);
            Ok(())
        }
        Commands::I18n(I18nCommands::Extract { root }) => {
            let controller = Controller::with_config(config)?;
            let keys = controller.extract_keys(root.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&keys)?);
            Ok(())
        }
        Commands::I18n(I18nCommands::Sync(args)) => run_sync(config, args).await,
        Commands::I18n(I18nCommands::Reset { root, dictionary, dry_run }) => {
            let dictionaries = if dictionary.is_empty() {
                config.i18n.reset_dictionaries.clone()
            } else {
                dictionary
            };
            let controller = Controller::with_config(config)?;
            let reports = controller.run_reset(root.as_deref(), &dictionaries, dry_run)?;
            check_reports(&reports)
        }
        Commands::Completions { .. } => Ok(()),
    }
}

async fn run_launch(mut config: Config, args: LaunchArgs) -> Result<()> {
    if let Some(preset) = args.preset {
        config.launcher.model_preset = Some(preset);
    }
    if let Some(version) = args.model_version {
        config.launcher.model_version = version;
    }
    if let Some(port) = args.port {
        config.launcher.tunnel.port = port;
    }
    if let Some(working_dir) = args.working_dir {
        config.launcher.working_dir = working_dir;
    }
    if let Some(server_log) = args.server_log {
        config.launcher.server_log = server_log;
    }

    let controller = Controller::with_config(config)?;
    let launch = controller.run_launch(&args.server_args, args.skip_tunnel).await?;

    match &launch.tunnel {
        Some(TunnelOutcome::Url(url)) => {
            info!("Extras URL:");
            println!("{}", url);
        }
        Some(TunnelOutcome::NoUrl { .. }) => warn!("The tunnel did not report a URL"),
        Some(TunnelOutcome::Failed { .. }) => error!("The tunnel failed to start"),
        None => {}
    }

    if args.detach {
        launch.server.detach();
        return Ok(());
    }

    let pid = launch.server.pid();
    let status = launch.server.wait().await?;
    if !status.success() {
        return Err(anyhow!("Server (pid {}) exited with {}", pid, status));
    }

    info!("Server (pid {}) exited", pid);
    Ok(())
}

fn run_presets(version: &str) {
    let presets = launcher::model_presets(version);
    let width = presets.labels().map(|label| label.chars().count()).max().unwrap_or(0);

    for (label, preset) in presets.iter() {
        println!("{:<width$}  {}", label, preset, width = width);
    }
}

async fn run_sync(mut config: Config, args: SyncArgs) -> Result<()> {
    if let Some(provider) = args.provider {
        config.translation.provider = provider.into();
    }
    if let Some(endpoint) = args.endpoint {
        config.translation.set_endpoint(endpoint);
    }
    if let Some(target) = args.target_language {
        config.translation.target_language = Some(target);
    }

    let dictionaries = if args.dictionary.is_empty() {
        config.i18n.sync_dictionaries.clone()
    } else {
        args.dictionary
    };

    let controller = Controller::with_config(config)?;
    let translator = providers::build_translator(&controller.config().translation)?;

    let reports = controller
        .run_sync(translator.as_ref(), args.root.as_deref(), &dictionaries, args.dry_run)
        .await?;
    check_reports(&reports)
}

fn check_reports(reports: &[FileReport]) -> Result<()> {
    let failed = reports.iter().filter(|r| r.result.is_err()).count();
    if failed > 0 {
        return Err(anyhow!("{} of {} dictionaries could not be processed", failed, reports.len()));
    }
    Ok(())
}
