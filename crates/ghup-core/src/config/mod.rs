//! Input resolution: CI environment defaults, overridden by explicit flags.
//!
//! [`resolve`] is a pure function of an [`Environment`] and [`InputArgs`]; it
//! never touches the filesystem or the network. Every check that can fail
//! without I/O happens here, so a bad invocation aborts before the first upload.

mod env;
mod error;
mod upload_url;

pub use env::{Environment, ProcessEnv, ENV_ASSETS, ENV_TOKEN, ENV_UPLOAD_URL, ENV_USER};
pub use error::ConfigError;
pub use upload_url::{normalize_upload_url, strip_uri_template};

use std::ffi::OsStr;
use std::fmt;
use std::path::PathBuf;

/// Explicit invocation inputs. `None` means the flag was not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputArgs {
    pub user: Option<String>,
    pub token: Option<String>,
    pub url: Option<String>,
    /// Positional asset paths; ignored when `INPUT_ASSETS` is non-empty.
    pub assets: Vec<PathBuf>,
}

/// Validated configuration for one run. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct RunConfig {
    user: String,
    token: String,
    upload_url: String,
    assets: Vec<PathBuf>,
}

impl RunConfig {
    /// Validates the inputs and normalizes `upload_url`.
    ///
    /// Checks run in a fixed order (assets, user, token, url) and the first
    /// failure is returned.
    pub fn new(
        user: impl Into<String>,
        token: impl Into<String>,
        upload_url: impl Into<String>,
        assets: Vec<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let (user, token, upload_url) = (user.into(), token.into(), upload_url.into());
        if assets.is_empty() {
            return Err(ConfigError::NoAssets);
        }
        if user.is_empty() {
            return Err(ConfigError::EmptyUser);
        }
        if token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        if upload_url.is_empty() {
            return Err(ConfigError::EmptyUploadUrl);
        }
        let upload_url = normalize_upload_url(&upload_url)?;
        Ok(Self {
            user,
            token,
            upload_url,
            assets,
        })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Upload endpoint with any URI template suffix removed.
    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    pub fn assets(&self) -> &[PathBuf] {
        &self.assets
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .field("upload_url", &self.upload_url)
            .field("assets", &self.assets)
            .finish()
    }
}

/// Resolves a [`RunConfig`] from environment defaults and explicit arguments.
pub fn resolve(env: &impl Environment, args: InputArgs) -> Result<RunConfig, ConfigError> {
    let user = args.user.or_else(|| env.var(ENV_USER)).unwrap_or_default();
    let token = args.token.or_else(|| env.var(ENV_TOKEN)).unwrap_or_default();
    let url = args
        .url
        .or_else(|| env.var(ENV_UPLOAD_URL))
        .unwrap_or_default();

    let assets = match env.var_os(ENV_ASSETS).filter(|s| !s.is_empty()) {
        Some(list) => {
            let assets = split_asset_list(&list);
            tracing::debug!(
                count = assets.len(),
                "asset list taken from {}",
                ENV_ASSETS
            );
            assets
        }
        None => args.assets,
    };

    let cfg = RunConfig::new(user, token, url, assets)?;
    tracing::debug!("resolved config: {:?}", cfg);
    Ok(cfg)
}

/// Splits an OS path-list string (`:` on Unix, `;` on Windows), dropping empty entries.
fn split_asset_list(list: &OsStr) -> Vec<PathBuf> {
    std::env::split_paths(list)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}
