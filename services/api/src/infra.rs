use leave_intel::error::AppError;
use leave_intel::intelligence::AssistantContext;
use metrics_exporter_prometheus::PrometheusHandle;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    /// Whether an inference service is configured, reported by `/ready`.
    pub(crate) delegating: bool,
}

/// Resolve correspondence from an inline argument, a file, or stdin, in that order.
pub(crate) fn read_correspondence(
    text: Option<String>,
    file: Option<&Path>,
) -> Result<String, AppError> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = file {
        return std::fs::read_to_string(path).map_err(|err| {
            AppError::Input(format!("cannot read correspondence from {}: {err}", path.display()))
        });
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Assemble assistant context from CLI flags; `None` when no flag was given.
pub(crate) fn build_context(
    name: Option<String>,
    balance: Option<u32>,
    pending: Option<u32>,
) -> Option<AssistantContext> {
    if name.is_none() && balance.is_none() && pending.is_none() {
        return None;
    }

    Some(AssistantContext {
        employee_name: name,
        remaining_balance_days: balance,
        pending_requests: pending,
        history: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_wins_over_file() {
        let text = read_correspondence(
            Some("annual leave".to_string()),
            Some(Path::new("/nonexistent/mail.txt")),
        )
        .expect("inline text used");
        assert_eq!(text, "annual leave");
    }

    #[test]
    fn missing_file_is_reported_as_input_error() {
        let error = read_correspondence(None, Some(Path::new("/nonexistent/mail.txt")))
            .expect_err("file does not exist");
        assert!(matches!(error, AppError::Input(_)));
    }

    #[test]
    fn context_is_only_built_when_a_flag_is_present() {
        assert!(build_context(None, None, None).is_none());

        let context = build_context(None, Some(9), None).expect("context built");
        assert_eq!(context.remaining_balance_days, Some(9));
        assert!(context.employee_name.is_none());
    }
}
