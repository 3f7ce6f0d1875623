//! Shared types, error model, and configuration for Vibesite.
//!
//! This crate is the foundation depended on by all other Vibesite crates.
//! It provides:
//! - [`VibesiteError`]: the unified error type
//! - Domain types ([`RepoRef`], [`Project`], [`PageData`], [`TrustedHtml`])
//! - Configuration ([`AppConfig`], [`GithubConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_CONFIG_FILE, GithubConfig, RenderMode, ServerConfig, SiteConfig,
    load_config, load_config_from, resolve_token,
};
pub use error::{Result, VibesiteError};
pub use types::{PageData, Project, RepoRef, TrustedHtml};
