//! Shared helper functions for CLI commands

use clap::ValueEnum;
use miette::Result;
use tracing::debug;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::backend::SqliteBackend;
use crate::core::config::Config;
use crate::core::identity::EntityId;
use crate::core::store::EntityStore;

/// Format an EntityId for display, truncating if too long
///
/// IDs longer than 16 characters are truncated to 13 chars with "..." suffix.
pub fn format_short_id(id: &EntityId) -> String {
    let s = id.to_string();
    if s.len() > 16 {
        format!("{}...", &s[..13])
    } else {
        s
    }
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an optional limit, using "-" when absent
pub fn format_limit(limit: Option<f64>) -> String {
    limit.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Resolve `auto` against the configured default format
pub fn resolve_format(requested: OutputFormat, config: &Config) -> OutputFormat {
    if requested != OutputFormat::Auto {
        return requested;
    }
    config
        .default_format
        .as_deref()
        .and_then(|s| OutputFormat::from_str(s, true).ok())
        .filter(|f| *f != OutputFormat::Auto)
        .unwrap_or(OutputFormat::Table)
}

/// Storage target: `--db` wins over config and environment
pub fn database_target(global: &GlobalOpts, config: &Config) -> String {
    global.db.clone().unwrap_or_else(|| config.database())
}

/// Open the SQLite-backed store the command should work against
pub fn open_store(global: &GlobalOpts, config: &Config) -> Result<EntityStore<SqliteBackend>> {
    let target = database_target(global, config);
    debug!(database = %target, "opening store");
    let backend = SqliteBackend::open_target(&target)?;
    Ok(EntityStore::new(backend))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::EntityKind;

    fn global(db: Option<&str>) -> GlobalOpts {
        GlobalOpts {
            format: OutputFormat::Auto,
            quiet: false,
            verbose: false,
            db: db.map(String::from),
        }
    }

    #[test]
    fn test_format_short_id() {
        let id = EntityId::new(EntityKind::Measurement);
        let formatted = format_short_id(&id);
        assert!(formatted.starts_with("MEAS-"));
        assert_eq!(formatted.len(), 16);
        assert!(formatted.ends_with("..."));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_format_limit() {
        assert_eq!(format_limit(Some(2.7)), "2.7");
        assert_eq!(format_limit(None), "-");
    }

    #[test]
    fn test_resolve_format() {
        let mut config = Config::default();
        assert_eq!(resolve_format(OutputFormat::Auto, &config), OutputFormat::Table);

        config.default_format = Some("JSON".to_string());
        assert_eq!(resolve_format(OutputFormat::Auto, &config), OutputFormat::Json);
        assert_eq!(resolve_format(OutputFormat::Csv, &config), OutputFormat::Csv);

        config.default_format = Some("xml".to_string());
        assert_eq!(resolve_format(OutputFormat::Auto, &config), OutputFormat::Table);
    }

    #[test]
    fn test_database_target_precedence() {
        let config = Config {
            database: Some("from-config.db".to_string()),
            default_format: None,
        };
        assert_eq!(database_target(&global(None), &config), "from-config.db");
        assert_eq!(database_target(&global(Some(":memory:")), &config), ":memory:");
        assert_eq!(database_target(&global(None), &Config::default()), "traceline.db");
    }
}
