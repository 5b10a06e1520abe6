//! Upload URL normalization.
//!
//! Release-creation actions (e.g. `actions/create-release`) output the upload
//! URL as an RFC 6570 template such as
//! `https://uploads.github.com/repos/o/r/releases/1/assets{?name,label}`.

use super::ConfigError;

/// Start of a URI template query expansion.
const TEMPLATE_MARKER: &str = "{?";

/// Path suffix every release asset upload endpoint ends with.
const ASSETS_SUFFIX: &str = "/assets";

/// Drops everything from the first `{?` onward.
pub fn strip_uri_template(url: &str) -> &str {
    match url.find(TEMPLATE_MARKER) {
        Some(i) => &url[..i],
        None => url,
    }
}

/// Strips the template suffix and checks the result looks like an upload endpoint.
pub fn normalize_upload_url(url: &str) -> Result<String, ConfigError> {
    let stripped = strip_uri_template(url);
    if !stripped.ends_with(ASSETS_SUFFIX) {
        return Err(ConfigError::NotAssetsUrl);
    }
    Ok(stripped.to_string())
}
