//! Process-wide configuration loaded from the environment.
//!
//! `AppConfig` is initialised lazily from `.env` and environment variables the
//! first time it is read. Setters exist so tests and the CLI can override
//! individual values after startup.

use once_cell::sync::OnceCell;
use std::env;
use std::sync::{RwLock, RwLockReadGuard};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub project_name: String,
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub log_to_stdout: bool,
}

static CONFIG: OnceCell<RwLock<AppConfig>> = OnceCell::new();

impl AppConfig {
    /// Reads `.env` (if present) and the process environment.
    ///
    /// Every variable has a default, so this never fails.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "bench-report".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "bench-report.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT")
                .map(|v| parse_bool(&v))
                .unwrap_or(true),
        }
    }

    /// Shared read access to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> RwLockReadGuard<'static, AppConfig> {
        CONFIG
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Reloads the configuration from the environment, discarding overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG.get() {
            if let Ok(mut guard) = lock.write() {
                *guard = AppConfig::from_env();
            }
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_dir(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_dir = value.into());
    }

    pub fn set_log_file(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_file = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "PROJECT_NAME",
        "LOG_LEVEL",
        "LOG_DIR",
        "LOG_FILE",
        "LOG_TO_STDOUT",
    ];

    fn clear_vars() {
        for k in VARS {
            unsafe { env::remove_var(k) };
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_when_env_is_empty() {
        clear_vars();
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.project_name, "bench-report");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.log_dir, "logs");
        assert_eq!(cfg.log_file, "bench-report.log");
        assert!(cfg.log_to_stdout);
    }

    #[test]
    #[serial]
    fn env_values_override_defaults() {
        clear_vars();
        unsafe {
            env::set_var("LOG_LEVEL", "evaluator=debug");
            env::set_var("LOG_TO_STDOUT", "false");
            env::set_var("LOG_FILE", "run.log");
        }
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.log_level, "evaluator=debug");
        assert_eq!(cfg.log_file, "run.log");
        assert!(!cfg.log_to_stdout);
        clear_vars();
    }

    #[test]
    #[serial]
    fn setters_update_the_global_and_reset_restores_it() {
        clear_vars();
        AppConfig::reset();
        AppConfig::set_log_level("trace");
        AppConfig::set_log_to_stdout(false);
        assert_eq!(AppConfig::global().log_level, "trace");
        assert!(!AppConfig::global().log_to_stdout);

        AppConfig::reset();
        assert_eq!(AppConfig::global().log_level, "info");
        assert!(AppConfig::global().log_to_stdout);
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert!(parse_bool("TRUE"));
        assert!(parse_bool(" yes "));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("nope"));
    }
}
