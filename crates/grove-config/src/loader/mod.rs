//! Manifest discovery and loading.
//!
//! Finds the project manifest, runs it through the matching evaluator and
//! decodes the result.

use crate::decode::decode;
use crate::eval::{Dhall, Evaluator, JsonEvaluator};
use crate::ConfigResult;
use camino::{Utf8Path, Utf8PathBuf};
use grove_core::error::GroveError;
use grove_core::Config;
use tracing::{debug, info};

/// Manifest file names, in order of preference within a directory
pub const MANIFEST_CANDIDATES: [&str; 2] = ["grove.dhall", "grove.json"];

/// How a manifest is turned into normal form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    /// Configuration-language source, evaluated by `dhall`
    Dhall,
    /// Already-normalised JSON
    Json,
}

impl ManifestFormat {
    /// Pick the format from the file extension; anything but `.json` is source
    pub fn of(path: &Utf8Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ManifestFormat::Json,
            _ => ManifestFormat::Dhall,
        }
    }
}

/// Loader settings gathered from flags and the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderSettings {
    /// Explicit manifest path; skips discovery
    pub manifest: Option<Utf8PathBuf>,
    /// Interpreter program name or path
    pub dhall: Option<String>,
}

/// Main manifest loading interface
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
    settings: LoaderSettings,
}

impl ManifestLoader {
    /// Create a new manifest loader
    pub fn new(cwd: Utf8PathBuf, settings: LoaderSettings) -> Self {
        Self { cwd, settings }
    }

    /// Find the manifest (walks up the directory tree)
    pub fn find_manifest(&self) -> ConfigResult<Utf8PathBuf> {
        if let Some(manifest) = &self.settings.manifest {
            return Ok(self.cwd.join(manifest));
        }

        for dir in self.cwd.ancestors() {
            for candidate in MANIFEST_CANDIDATES {
                let path = dir.join(candidate);
                if path.is_file() {
                    debug!("Found manifest at {}", path);
                    return Ok(path);
                }
            }
        }

        Err(GroveError::ManifestNotFound {
            searched: self.cwd.to_string(),
            candidates: MANIFEST_CANDIDATES.join(", "),
        }
        .into())
    }

    /// Locate, evaluate and decode the project manifest
    pub async fn load(&self) -> ConfigResult<(Config, Utf8PathBuf)> {
        let path = self.find_manifest()?;
        let config = match ManifestFormat::of(&path) {
            ManifestFormat::Json => self.load_with(&JsonEvaluator, &path).await?,
            ManifestFormat::Dhall => {
                let evaluator = Dhall::locate(self.settings.dhall.as_deref())?;
                self.load_with(&evaluator, &path).await?
            }
        };
        Ok((config, path))
    }

    /// Evaluate and decode `path` with a specific evaluator
    pub async fn load_with<E: Evaluator>(&self, evaluator: &E, path: &Utf8Path) -> ConfigResult<Config> {
        info!("Loading manifest {}", path);
        let expr = evaluator.normalize(path).await?;
        Ok(decode(&expr)?)
    }
}
