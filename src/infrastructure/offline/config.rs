//! Worker configuration built once at boot.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use url::Url;

use super::worker::WorkerError;

/// The asset list emitted by the site build.
///
/// ```json
/// {
///   "version": "1718000000000",
///   "build": ["/_app/immutable/entry/start.js"],
///   "files": ["/favicon.png", "/manifest.json"]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct AssetManifest {
    pub version: String,
    #[serde(default)]
    pub build: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

impl AssetManifest {
    /// Reads a manifest from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Manifest`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorkerError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| WorkerError::Manifest(format!("{}: {e}", path.display())))?;

        serde_json::from_str(&raw)
            .map_err(|e| WorkerError::Manifest(format!("{}: {e}", path.display())))
    }
}

/// Immutable configuration of one worker generation.
///
/// Holds the versioned cache name, the origin the assets are served from
/// and the set of build/static asset paths.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    version: String,
    cache_name: String,
    origin: Url,
    assets: BTreeSet<String>,
}

impl WorkerConfig {
    /// Builds a configuration for `version` with assets under `origin`.
    ///
    /// Asset paths are normalized to start with `/`; duplicates collapse.
    pub fn new<I, S>(version: impl Into<String>, origin: Url, assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let version = version.into();
        let assets = assets
            .into_iter()
            .map(|path| {
                let path = path.as_ref();
                if path.starts_with('/') {
                    path.to_string()
                } else {
                    format!("/{path}")
                }
            })
            .collect();

        Self {
            cache_name: cache_name_for(&version),
            version,
            origin,
            assets,
        }
    }

    /// Builds a configuration from a build manifest (build files first,
    /// then static files).
    pub fn from_manifest(manifest: AssetManifest, origin: Url) -> Self {
        let assets = manifest.build.into_iter().chain(manifest.files);
        Self::new(manifest.version, origin, assets)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Name of the cache bucket owned by this version (`cache-{version}`).
    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn assets(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(String::as_str)
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    /// Whether `path` is one of the known build/static asset paths.
    pub fn is_asset(&self, path: &str) -> bool {
        self.assets.contains(path)
    }

    /// Resolves a path against the origin.
    ///
    /// Query and fragment of `path` are kept as given.
    pub fn resolve(&self, path: &str) -> Result<Url, url::ParseError> {
        self.origin.join(path)
    }
}

/// `cache-{version}`
pub fn cache_name_for(version: &str) -> String {
    format!("cache-{version}")
}
