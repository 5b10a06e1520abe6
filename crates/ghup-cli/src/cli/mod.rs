//! CLI for the ghup release asset uploader.

use anyhow::Result;
use clap::Parser;
use ghup_core::config::{self, InputArgs, ProcessEnv};
use ghup_core::upload::{self, UploadOptions};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// Long flags that older invocations spell with a single dash (`-user`).
const SINGLE_DASH_LONG_FLAGS: [&str; 3] = ["user", "token", "url"];

/// Upload files as assets of an existing GitHub release.
///
/// Flags default to the values CI provides in the environment:
/// GITHUB_ACTOR, GITHUB_TOKEN and INPUT_UPLOAD_URL. When INPUT_ASSETS is set
/// and non-empty it replaces the positional ASSETS list.
#[derive(Debug, Parser)]
#[command(name = "ghup", version)]
#[command(about = "Upload files as GitHub release assets")]
pub struct Cli {
    /// GitHub user [default: $GITHUB_ACTOR]
    #[arg(short, long)]
    pub user: Option<String>,

    /// GitHub authorization token [default: $GITHUB_TOKEN]
    #[arg(short, long)]
    pub token: Option<String>,

    /// Release assets upload url [default: $INPUT_UPLOAD_URL]
    #[arg(long)]
    pub url: Option<String>,

    /// Give up on a single asset after this many seconds.
    #[arg(
        long,
        default_value_t = 300,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Log each upload to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Files to upload, in order.
    #[arg(value_name = "ASSETS")]
    pub assets: Vec<PathBuf>,
}

impl Cli {
    /// Parses the process arguments, accepting the single-dash long flags too.
    pub fn parse_from_env() -> Self {
        Self::parse_from(normalize_single_dash_flags(std::env::args_os()))
    }

    pub fn input_args(&self) -> InputArgs {
        InputArgs {
            user: self.user.clone(),
            token: self.token.clone(),
            url: self.url.clone(),
            assets: self.assets.clone(),
        }
    }

    pub fn upload_options(&self) -> UploadOptions {
        UploadOptions::with_timeout(Duration::from_secs(self.timeout_secs))
    }

    /// Resolves the configuration and uploads every asset.
    pub fn run(self) -> Result<()> {
        let cfg = config::resolve(&ProcessEnv, self.input_args())?;
        let opts = self.upload_options();
        tracing::debug!(
            assets = cfg.assets().len(),
            timeout_secs = opts.timeout.as_secs(),
            "starting upload run"
        );
        upload::upload_all(&cfg, &opts)?;
        Ok(())
    }
}

/// Rewrites `-user`, `-token`, `-url` (and their `=value` forms) to the double-dash
/// spelling. Everything after a bare `--` is left alone.
pub fn normalize_single_dash_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    for arg in args {
        if passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        let rewritten = arg.to_str().and_then(|s| {
            let rest = s.strip_prefix('-')?;
            if rest.starts_with('-') {
                return None;
            }
            let name = rest.split_once('=').map_or(rest, |(n, _)| n);
            SINGLE_DASH_LONG_FLAGS
                .contains(&name)
                .then(|| OsString::from(format!("-{}", s)))
        });
        out.push(rewritten.unwrap_or(arg));
    }
    out
}
