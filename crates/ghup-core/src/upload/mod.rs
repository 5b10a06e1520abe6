//! Release asset uploader.
//!
//! Uses the curl crate (libcurl) to POST each file's raw bytes to the release
//! upload endpoint with basic auth. Uploads are strictly sequential and the
//! first failure stops the run.

mod error;
mod request;
mod sniff;
mod status;

pub use error::{AssetError, UploadError};
pub use request::{asset_name, asset_url, AssetBody};
pub use sniff::{content_type, SNIFF_LEN};

use crate::config::RunConfig;
use std::io::Read;
use std::path::Path;
use std::str;
use std::time::Duration;
use url::Url;

/// The only status that counts as a successful upload.
const HTTP_CREATED: u32 = 201;

/// Transport settings applied to every upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    /// Limit for the whole request, from connect to last response byte.
    pub timeout: Duration,
    /// Limit for establishing the connection; never longer than `timeout`.
    pub connect_timeout: Duration,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5 * 60),
            connect_timeout: Duration::from_secs(30),
        }
    }
}

impl UploadOptions {
    /// Default options with a different overall timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

/// Uploads every asset in `cfg` in order, stopping at the first failure.
pub fn upload_all(cfg: &RunConfig, opts: &UploadOptions) -> Result<(), UploadError> {
    for path in cfg.assets() {
        upload_asset(cfg, path, opts).map_err(|source| UploadError {
            path: path.clone(),
            source,
        })?;
    }
    tracing::info!(count = cfg.assets().len(), "all assets uploaded");
    Ok(())
}

/// Uploads one file to the release named by `cfg`.
///
/// Runs in the current thread and blocks for at most `opts.timeout`.
pub fn upload_asset(cfg: &RunConfig, path: &Path, opts: &UploadOptions) -> Result<(), AssetError> {
    let base = Url::parse(cfg.upload_url())?;
    let mut body = AssetBody::open(path)?;
    let name = asset_name(path).ok_or(AssetError::NoFileName)?;
    let url = asset_url(&base, &name);

    tracing::info!(
        path = %path.display(),
        name = %name,
        size = ?body.len(),
        content_type = body.content_type(),
        "uploading asset"
    );

    let mut easy = curl::easy::Easy::new();
    easy.url(url.as_str())?;
    easy.post(true)?;
    if let Some(len) = body.len() {
        easy.post_field_size(len)?;
    }
    easy.username(cfg.user())?;
    easy.password(cfg.token())?;
    let mut auth = curl::easy::Auth::new();
    auth.basic(true);
    easy.http_auth(&auth)?;
    easy.connect_timeout(opts.connect_timeout.min(opts.timeout))?;
    easy.timeout(opts.timeout)?;

    let mut list = curl::easy::List::new();
    list.append(&format!("Content-Type: {}", body.content_type()))?;
    // Send the body right away instead of waiting for 100 Continue.
    list.append("Expect:")?;
    easy.http_headers(list)?;

    let mut headers: Vec<String> = Vec::new();
    let mut read_error: Option<std::io::Error> = None;
    let performed = {
        let mut transfer = easy.transfer();
        transfer.read_function(|buf| match body.read(buf) {
            Ok(n) => Ok(n),
            Err(e) => {
                read_error = Some(e);
                Err(curl::easy::ReadError::Abort)
            }
        })?;
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        // Response body is a JSON asset description we do not need.
        transfer.write_function(|data| Ok(data.len()))?;
        transfer.perform()
    };

    if let Some(e) = read_error {
        return Err(AssetError::Read(e));
    }
    performed.map_err(|e| AssetError::from_transfer(e, opts.timeout))?;

    let code = easy.response_code()?;
    if code != HTTP_CREATED {
        let status = status::status_text(&headers, code);
        tracing::debug!(path = %path.display(), status = %status, "upload rejected");
        return Err(AssetError::Status(status));
    }

    tracing::info!(path = %path.display(), name = %name, "asset uploaded");
    Ok(())
}
