//! Command implementations and dispatch logic.
//!
//! Each command is an async function that takes a CommandContext, loads the
//! manifest through the shared loader and reports on the decoded model.

use camino::Utf8PathBuf;
use grove_config::{ConfigResult, LoaderSettings, ManifestLoader};
use grove_core::error::GroveError;
use grove_core::utils::ColorSupport;
use grove_core::Config;
use tracing::info;

pub mod check;
pub mod deps;
pub mod json;
pub mod packages;


use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub settings: LoaderSettings,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(settings: LoaderSettings, colors: ColorSupport) -> ConfigResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| GroveError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| {
            GroveError::io(
                "Current directory is not valid UTF-8".to_string(),
                e.into_io_error(),
            )
        })?;

        Ok(Self {
            cwd,
            settings,
            output: OutputHandler::new(colors),
        })
    }

    /// Manifest loader rooted at the working directory
    pub fn loader(&self) -> ManifestLoader {
        ManifestLoader::new(self.cwd.clone(), self.settings.clone())
    }

    /// Load and decode the project manifest
    pub async fn load_config(&self) -> ConfigResult<Config> {
        let (config, path) = self.loader().load().await?;
        info!("Decoded {} from {}", config.name, path);
        Ok(config)
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> ConfigResult<()> {
    match command {
        Commands::Check => {
            info!("Checking manifest");
            check::execute(ctx).await
        }
        Commands::Json { output } => {
            info!("Exporting manifest as JSON (output: {:?})", output);
            json::execute(output, ctx).await
        }
        Commands::Deps => {
            info!("Listing direct dependencies");
            deps::execute(ctx).await
        }
        Commands::Packages => {
            info!("Listing package set");
            packages::execute(ctx).await
        }
    }
}
