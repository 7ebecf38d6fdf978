use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Fertiva";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of ranked matches returned per query.
pub const DEFAULT_TOP_K: usize = 4;

/// Default minimum cosine similarity a candidate must reach to qualify.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.5;

/// Default result cap for the lexical fallback matcher.
pub const DEFAULT_LEXICAL_LIMIT: usize = 10;

/// Keys under which `rag_config` may override the retrieval defaults.
pub const CONFIG_KEY_TOP_K: &str = "retrieval.top_k";
pub const CONFIG_KEY_THRESHOLD: &str = "retrieval.threshold";
pub const CONFIG_KEY_LEXICAL_LIMIT: &str = "retrieval.lexical_limit";

/// Default tracing filter when RUST_LOG is not set
pub fn default_log_filter() -> String {
    "fertiva=info,warn".to_string()
}

/// Get the application data directory
/// ~/Fertiva/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Fertiva")
}

/// Get the default knowledge-base database path
pub fn database_path() -> PathBuf {
    app_data_dir().join("fertiva.db")
}
