/// Application-level constants
pub const APP_NAME: &str = "Chronicard";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base URL of the local Ollama instance used for all model calls.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Request timeout for model calls, in seconds. Card generation asks for
/// 500-1000 words of markdown, which can take minutes on CPU-only hosts.
pub const DEFAULT_OLLAMA_TIMEOUT_SECS: u64 = 300;

/// Default log filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}
