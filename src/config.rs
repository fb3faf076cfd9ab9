use std::{env, path::PathBuf, time::Duration};

// Runtime constants, the speed intervals live with `Speed`.

/// Input timeout while a menu is shown, bounds how late a resize is noticed.
pub const MENU_POLL_INTERVAL: Duration = Duration::from_millis(250);
/// Rows reserved above the grid for the status line.
pub const HEADER_HEIGHT: u16 = 1;

const DEFAULT_LOG_FILE: &str = "lifeterm.log";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_file: PathBuf,
    pub log_format: LogFormat,
    pub log_filter: String,
}

impl Config {
    /// Reads `.env` when present, then the process environment.
    pub fn from_env() -> Self {
        // logging is not up yet, and the terminal is still ours
        if let Some(warning) = dotenv_warning(dotenvy::dotenv()) {
            eprintln!("[warning] {warning}");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_file = lookup("LIFE_LOG_FILE")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join(DEFAULT_LOG_FILE));
        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        };
        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Self {
            log_file,
            log_format,
            log_filter,
        }
    }
}

/// A missing `.env` is the normal case, anything else is worth reporting.
fn dotenv_warning<T>(result: dotenvy::Result<T>) -> Option<String> {
    match result {
        Ok(_) => None,
        Err(error) if error.not_found() => None,
        Err(error) => Some(format!("ignoring .env: {error}")),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.log_file, env::temp_dir().join("lifeterm.log"));
        assert_eq!(config.log_format, LogFormat::Compact);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup(&[
            ("LIFE_LOG_FILE", "/var/log/life.log"),
            ("LOG_FORMAT", "json"),
            ("RUST_LOG", "lifeterm=trace"),
        ]));
        assert_eq!(config.log_file, PathBuf::from("/var/log/life.log"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_filter, "lifeterm=trace");
    }

    #[test]
    fn dotenv_errors() {
        let missing = dotenvy::Error::Io(io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(dotenv_warning::<()>(Err(missing)), None);
        assert_eq!(dotenv_warning(Ok(PathBuf::from(".env"))), None);

        let malformed = dotenvy::Error::LineParse("NOT A PAIR".to_string(), 3);
        let warning = dotenv_warning::<()>(Err(malformed)).unwrap();
        assert!(warning.starts_with("ignoring .env: "));

        let denied = dotenvy::Error::Io(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(dotenv_warning::<()>(Err(denied)).is_some());
    }

    #[test]
    fn unknown_format_and_empty_path() {
        let config = Config::from_lookup(lookup(&[("LIFE_LOG_FILE", ""), ("LOG_FORMAT", "xml")]));
        assert_eq!(config.log_format, LogFormat::Compact);
        assert_eq!(config.log_file, env::temp_dir().join("lifeterm.log"));
    }
}
