//! Environment lookup used for CI-provided defaults.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

/// GitHub Actions actor name; default basic-auth user.
pub const ENV_USER: &str = "GITHUB_ACTOR";
/// Authorization token; default basic-auth password.
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";
/// Upload URL emitted by a prior create-release step.
pub const ENV_UPLOAD_URL: &str = "INPUT_UPLOAD_URL";
/// OS path-list of files to upload. Overrides positional assets when non-empty.
pub const ENV_ASSETS: &str = "INPUT_ASSETS";

/// Key-value source of default configuration.
pub trait Environment {
    /// Returns the value for `key`, or `None` if unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns the raw value for `key`, unicode or not. Paths must be read through this.
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.var(key).map(OsString::from)
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Environment for HashMap<&str, &str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.to_string())
    }
}

impl Environment for HashMap<OsString, OsString> {
    fn var(&self, key: &str) -> Option<String> {
        self.var_os(key)?.into_string().ok()
    }

    fn var_os(&self, key: &str) -> Option<OsString> {
        self.get(OsStr::new(key)).cloned()
    }
}
