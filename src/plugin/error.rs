/// Errors reported by plugin hooks and lifecycle callbacks.
///
/// The manager never propagates these; they are logged and the pipeline
/// continues with the value it had before the failing hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    /// A hook or callback reported a failure
    Failed(String),
    /// A hook received a value it cannot handle
    InvalidInput(String),
    /// A hook panicked; holds the panic message when it was a string
    Panicked(String),
}

impl PluginError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl std::fmt::Display for PluginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed(msg) => write!(f, "plugin failed: {}", msg),
            Self::InvalidInput(msg) => write!(f, "invalid hook input: {}", msg),
            Self::Panicked(msg) => write!(f, "plugin panicked: {}", msg),
        }
    }
}

impl std::error::Error for PluginError {}
