//! CLI configuration — thin wrapper around `segmenta_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-url, --timeout, etc.).

use std::time::Duration;

use clap::ValueEnum;
use segmenta_core::ClientConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use segmenta_config::{Config, Profile, config_path, load_config, parse_base_url, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Fill output / color from `[defaults]` where no flag was given.
pub fn apply_defaults(global: &mut GlobalOpts, config: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&config.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&config.defaults.color, true).ok();
    }
}

/// Rows per page: flag, then `[defaults] page_size`.
pub fn page_size(flag: Option<usize>, config: &Config) -> usize {
    flag.unwrap_or(config.defaults.page_size)
}

/// Translate config + global flags into a `ClientConfig`.
///
/// The URL comes from `--api-url` / `SEGMENTA_API_BASE_URL` first, then the
/// active profile. Timeout and TLS flags override the profile values.
pub fn resolve_client_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<ClientConfig, CliError> {
    let profile_name = active_profile_name(global, config);
    let profile = config.profiles.get(&profile_name);

    let mut client = match (global.api_url.as_deref(), profile) {
        (Some(url), Some(profile)) => {
            let mut cfg = segmenta_config::profile_to_client_config(profile, &config.defaults)?;
            cfg.base_url = parse_base_url(url)?;
            cfg
        }
        (Some(url), None) => {
            let mut cfg = ClientConfig::new(parse_base_url(url)?);
            cfg.timeout = config.defaults.timeout.map(Duration::from_secs);
            cfg.insecure = config.defaults.insecure;
            cfg
        }
        (None, Some(profile)) => {
            segmenta_config::profile_to_client_config(profile, &config.defaults)?
        }
        (None, None) if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(config),
            });
        }
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    if let Some(secs) = global.timeout {
        client.timeout = Some(Duration::from_secs(secs));
    }
    client.insecure |= global.insecure;

    tracing::debug!(
        profile = %profile_name,
        base_url = %client.base_url,
        timeout = ?client.timeout,
        "resolved backend"
    );
    Ok(client)
}

pub fn available_profiles(config: &Config) -> String {
    let names = config.profile_names();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}
