//! Server configuration
//!
//! Settings come from the process environment, optionally primed from an env
//! file picked by the run mode. Invalid values are logged and replaced with
//! their defaults rather than aborting startup.

use std::{env, path::PathBuf};
use tracing::{error, info, warn};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOCAL_TEST_PORT: u16 = 4000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    Production,
    Development,
    LocalTest,
}

impl RunMode {
    /// Reads `SMOKEY_ENV` and `SMOKEY_LOCAL_TEST`.
    pub fn from_env() -> Self {
        let local_test = env::var("SMOKEY_LOCAL_TEST").map(|s| s == "1" || s == "true").unwrap_or(false);
        match env::var("SMOKEY_ENV").as_deref() {
            _ if local_test => RunMode::LocalTest,
            Ok("test") => RunMode::LocalTest,
            Ok("production") => RunMode::Production,
            _ => RunMode::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Production => "production",
            RunMode::Development => "development",
            RunMode::LocalTest => "local-test",
        }
    }

    pub fn is_production(&self) -> bool {
        *self == RunMode::Production
    }

    pub fn env_file(&self) -> &'static str {
        match self {
            RunMode::Production => ".env",
            RunMode::Development => ".env.local",
            RunMode::LocalTest => ".env.test",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            RunMode::LocalTest => DEFAULT_LOCAL_TEST_PORT,
            _ => DEFAULT_PORT,
        }
    }

    pub fn default_cors_origins(&self) -> Vec<String> {
        let origins: &[&str] = match self {
            RunMode::Production => &["https://smokey.infinityfreeapp.com"],
            RunMode::Development => &["http://localhost:5173", "http://localhost:3000"],
            RunMode::LocalTest => &["http://localhost:5173", "http://localhost:3000", "http://localhost:8080"],
        };
        origins.iter().map(|s| s.to_string()).collect()
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub mode: RunMode,
    /// Browser origins allowed by CORS. Requests without an `Origin` header are always served.
    pub cors_origins: Vec<String>,
    /// Fill an empty catalog at startup.
    pub seed_catalog: bool,
    /// Seed menu to use instead of the bundled one.
    pub seed_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::for_mode(RunMode::Development)
    }
}

impl ServerConfig {
    pub fn for_mode(mode: RunMode) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: mode.default_port(),
            mode,
            cors_origins: mode.default_cors_origins(),
            seed_catalog: true,
            seed_file: None,
        }
    }

    /// Determines the run mode, loads its env file, then reads the environment.
    pub fn load() -> Self {
        let mode = RunMode::from_env();
        match dotenvy::from_filename(mode.env_file()) {
            Ok(path) => info!("🪛️ Loaded {}", path.display()),
            Err(e) if e.not_found() => info!("🪛️ No {} file found, using the process environment", mode.env_file()),
            Err(e) => warn!("🪛️ Could not load {}. {e}", mode.env_file()),
        }
        Self::from_env_or_default(mode)
    }

    pub fn from_env_or_default(mode: RunMode) -> Self {
        let defaults = Self::for_mode(mode);
        let host = env::var("SMOKEY_HOST").ok().filter(|s| !s.is_empty()).unwrap_or(defaults.host);
        let port = env::var("SMOKEY_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for SMOKEY_PORT. {e} Using the default, {}, instead.", defaults.port);
                    defaults.port
                })
            })
            .unwrap_or(defaults.port);
        let cors_origins = env::var("SMOKEY_CORS_ORIGINS")
            .ok()
            .map(|s| parse_origins(&s))
            .filter(|origins| !origins.is_empty())
            .unwrap_or(defaults.cors_origins);
        let seed_catalog = env::var("SMOKEY_SEED_CATALOG").map(|s| s != "0" && s != "false").unwrap_or(true);
        let seed_file = env::var("SMOKEY_SEED_FILE").ok().filter(|s| !s.is_empty()).map(PathBuf::from);
        Self { host, port, mode, cors_origins, seed_catalog, seed_file }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}
