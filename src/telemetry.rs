use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::ObservabilityConfig;
use crate::requests::types::{RequestAction, RequestId};
use crate::roles::Role;

/// Initialize structured logging.
/// `RUST_LOG` wins over the configured level when it is set. Logs go to stderr
/// so command output on stdout stays machine readable.
pub fn init_telemetry(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let json_layer = config.json_logs.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!config.json_logs)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()?;

    tracing::debug!("trainflow telemetry initialized");
    Ok(())
}

/// Generate a correlation ID for linking the log lines of one workflow call
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span wrapping a single request transition
pub fn create_workflow_span(
    request_id: &RequestId,
    role: Role,
    action: RequestAction,
    correlation_id: &str,
) -> tracing::Span {
    tracing::info_span!(
        "request_workflow",
        request.id = %request_id,
        role = %role,
        action = %action,
        correlation.id = correlation_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_ids_are_unique() {
        let a = generate_correlation_id();
        let b = generate_correlation_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
