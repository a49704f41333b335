//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use segmenta_config::ConfigError;
use segmenta_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to backend at {url}")]
    #[diagnostic(
        code(segmenta::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Override the URL with --api-url or SEGMENTA_API_BASE_URL."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(segmenta::timeout),
        help("Increase the limit with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(segmenta::not_found),
        help("Run: segmenta {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error ({code}): {message}")]
    #[diagnostic(code(segmenta::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(segmenta::validation))]
    Validation { field: String, reason: String },

    #[error("Invalid input")]
    #[diagnostic(code(segmenta::invalid_input), help("{details}"))]
    InvalidInput { details: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(segmenta::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: segmenta config init --profile {name} --api-url <URL>"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(segmenta::no_config),
        help(
            "Create a profile with: segmenta config init --api-url <URL>\n\
             or pass --api-url / set SEGMENTA_API_BASE_URL.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(segmenta::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(segmenta::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(segmenta::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(segmenta::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::InvalidInput { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub fn not_found(resource_type: &str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.into(),
            list_command: format!("{resource_type}s list"),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: format!("{entity_type}s list"),
                resource_type: entity_type,
                identifier,
            },

            CoreError::ValidationFailed { errors } => CliError::InvalidInput {
                details: errors
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            },

            CoreError::InvalidPayload { message } => CliError::Validation {
                field: "payload".into(),
                reason: message,
            },

            CoreError::Api { message, status } => CliError::ApiError {
                code: status.map_or_else(|| "-".into(), |s| s.to_string()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "api_base_url".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError {
                code: "internal".into(),
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segmenta_core::FieldErrors;

    #[test]
    fn validation_lists_every_field() {
        let mut errors = FieldErrors::new();
        errors.add("device_name", "Requerido");
        errors.add("latitud", "Número");

        let err = CliError::from(CoreError::ValidationFailed { errors });
        assert_eq!(err.exit_code(), exit_code::USAGE);
        let CliError::InvalidInput { details } = err else {
            panic!("expected InvalidInput");
        };
        assert_eq!(details, "device_name: Requerido\nlatitud: Número");
    }

    #[test]
    fn http_status_becomes_the_code() {
        let err = CliError::from(CoreError::Api {
            message: "boom".into(),
            status: Some(503),
        });
        assert_eq!(err.to_string(), "API error (503): boom");
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn not_found_points_at_the_list_command() {
        let CliError::NotFound { list_command, .. } = CliError::not_found("router", "9") else {
            panic!("expected NotFound");
        };
        assert_eq!(list_command, "routers list");
    }
}
