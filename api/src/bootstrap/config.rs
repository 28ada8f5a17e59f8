use std::env;
use std::fmt::Display;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_SERVER_PORT: u16 = 8080;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub postgres_url: String,
    pub mongo_uri: String,
    /// Close the relational store again when the document store fails during startup.
    pub release_on_failure: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Never fails: missing or
    /// malformed values fall back to defaults and are logged.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_port = env_int_or(&lookup, "SERVER_PORT", DEFAULT_SERVER_PORT);
        // Empty defaults on purpose: an unconfigured process must fail at connect time.
        let postgres_url = env_or(&lookup, "POSTGRES_URL", "");
        let mongo_uri = env_or(&lookup, "MONGO_URI", "");
        let release_on_failure = env_bool_or(&lookup, "BOOTSTRAP_RELEASE_ON_FAILURE", false);

        Self {
            server_port,
            postgres_url,
            mongo_uri,
            release_on_failure,
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.server_port))
    }
}

/// Outcome of seeding the process environment from a local `.env` file.
#[derive(Debug)]
pub enum EnvFile {
    Loaded(PathBuf),
    Missing,
    Invalid(dotenvy::Error),
}

impl EnvFile {
    /// Reads `.env` from the working directory only. Parent directories are not searched.
    pub fn load() -> Self {
        Self::load_from(".env")
    }

    pub fn load_in(dir: impl AsRef<Path>) -> Self {
        Self::load_from(dir.as_ref().join(".env"))
    }

    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::from_result(dotenvy::from_path(path).map(|()| path.to_path_buf()))
    }

    fn from_result(res: Result<PathBuf, dotenvy::Error>) -> Self {
        match res {
            Ok(path) => EnvFile::Loaded(path),
            Err(e) if e.not_found() => EnvFile::Missing,
            Err(e) => EnvFile::Invalid(e),
        }
    }

    /// Logs the outcome. Meant to run once tracing is initialised.
    pub fn report(&self) {
        match self {
            EnvFile::Loaded(path) => tracing::info!(path = %path.display(), "env_file_loaded"),
            EnvFile::Missing => {
                tracing::info!("No .env file found, reading environment variables directly")
            }
            EnvFile::Invalid(e) => {
                tracing::warn!(error = %e, "env_file_unreadable_reading_environment_directly")
            }
        }
    }
}

pub fn env_or<F>(lookup: &F, key: &str, fallback: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value,
        None => {
            tracing::info!(key, default = fallback, "env_var_missing_using_default");
            fallback.to_string()
        }
    }
}

pub fn env_int_or<F, T>(lookup: &F, key: &str, fallback: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display + Copy,
{
    let Some(raw) = lookup(key) else {
        tracing::info!(key, default = %fallback, "env_var_missing_using_default");
        return fallback;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, default = %fallback, "env_var_not_an_integer_using_default");
            fallback
        }
    }
}

pub fn env_bool_or<F>(lookup: &F, key: &str, fallback: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        tracing::info!(key, default = fallback, "env_var_missing_using_default");
        return fallback;
    };
    match parse_bool(raw.trim()) {
        Some(value) => value,
        None => {
            tracing::warn!(key, value = %raw, default = fallback, "env_var_not_a_boolean_using_default");
            fallback
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
