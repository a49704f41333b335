//! Config subcommand handlers.

use std::fmt::Write;
use std::io::IsTerminal;

use dialoguer::Input;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display as TOML-like text.
fn format_config(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    if let Some(timeout) = cfg.defaults.timeout {
        let _ = writeln!(out, "timeout = {timeout}");
    }
    let _ = writeln!(out, "page_size = {}", cfg.defaults.page_size);

    for name in cfg.profile_names() {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "api_base_url = \"{}\"", p.api_base_url);
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Backend URL from `--api-url`, else an interactive prompt.
fn base_url(global: &GlobalOpts) -> Result<String, CliError> {
    if let Some(ref url) = global.api_url {
        return Ok(url.clone());
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::Validation {
            field: "api-url".into(),
            reason: "pass --api-url when not running interactively".into(),
        });
    }
    Input::new()
        .with_prompt("Backend URL")
        .default("http://localhost:8000".into())
        .interact_text()
        .map_err(prompt_err)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: add or replace a profile ──────────────────────────
        ConfigCommand::Init => {
            let mut cfg = config::load_config()?;
            let profile_name = global.profile.clone().unwrap_or_else(|| "default".into());

            let url = base_url(global)?;
            config::parse_base_url(&url)?;

            let profile = Profile {
                timeout: global.timeout,
                insecure: global.insecure.then_some(true),
                ..Profile::new(url.trim())
            };
            cfg.profiles.insert(profile_name.clone(), profile);

            let default_missing = cfg
                .default_profile
                .as_ref()
                .is_none_or(|name| !cfg.profiles.contains_key(name));
            if default_missing {
                cfg.default_profile = Some(profile_name.clone());
            }

            let path = config::save_config(&cfg)?;
            output::success(global, &format!("Configuration written to {}", path.display()));
            if !global.quiet {
                eprintln!("  Profile: {profile_name}");
                eprintln!("  Try it: segmenta routers list");
            }
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = output::render_single(global.output(), &cfg, format_config, |_| {
                config::config_path().display().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_lists_profiles_sorted() {
        let mut cfg = Config::default();
        cfg.profiles.insert("zeta".into(), Profile::new("https://z.example.com"));
        cfg.profiles.insert(
            "alpha".into(),
            Profile {
                timeout: Some(5),
                ..Profile::new("https://a.example.com")
            },
        );

        let text = format_config(&cfg);
        let alpha = text.find("[profiles.alpha]");
        let zeta = text.find("[profiles.zeta]");
        assert!(alpha.is_some() && alpha < zeta, "{text}");
        assert!(text.contains("timeout = 5"));
        // No default timeout unless configured.
        assert!(text.contains("insecure = false\npage_size = 10"));
    }
}
