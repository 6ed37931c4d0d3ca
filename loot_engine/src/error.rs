use thiserror::Error;

/// Failure reported by a UI widget call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("widget has no method '{0}'")]
    UnknownMethod(String),
    #[error("widget method '{method}' rejected its arguments: {reason}")]
    BadArguments { method: String, reason: String },
    #[error("widget is not loaded")]
    Unloaded,
}
