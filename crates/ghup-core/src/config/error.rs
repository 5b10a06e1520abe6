//! Configuration errors, all detected before any network activity.

/// Why inputs could not be turned into a [`RunConfig`](super::RunConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("nothing to upload")]
    NoAssets,
    #[error("empty username")]
    EmptyUser,
    #[error("empty auth token")]
    EmptyToken,
    #[error("empty upload url")]
    EmptyUploadUrl,
    #[error("assets upload url path expected to end with /assets")]
    NotAssetsUrl,
}
