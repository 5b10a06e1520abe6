//! Core of `ghup`: resolves CI inputs into a [`config::RunConfig`] and uploads
//! each listed file as a GitHub release asset.

pub mod config;
pub mod logging;
pub mod upload;
