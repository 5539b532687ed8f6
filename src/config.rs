//! Runtime settings read from the environment.

use std::path::PathBuf;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Server settings. `HOST` / `PORT` pick the bind address; `DATA_DIR` enables
/// the file store (unset = in-memory, state lost on exit).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unparsable or blank values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let port = match non_blank("PORT").map(|p| p.trim().parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(_)) => {
                log::warn!("Ignoring invalid PORT, using {}", default_port());
                default_port()
            }
            None => default_port(),
        };
        Self {
            host: non_blank("HOST").unwrap_or_else(default_host),
            port,
            data_dir: non_blank("DATA_DIR").map(PathBuf::from),
        }
    }
}
