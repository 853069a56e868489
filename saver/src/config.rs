use crate::errors::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// SQLite database file; created on first start.
    #[serde(alias = "DbPath")]
    pub db_path: PathBuf,
    #[serde(alias = "Port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_host() -> String {
    "0.0.0.0".into()
}

impl Config {
    /// Reads the TOML file at `path`, then applies `DB_PATH` / `PORT` overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let mut cfg = Self::from_toml(&raw)?;

        if let Ok(db_path) = env::var("DB_PATH") {
            cfg.db_path = PathBuf::from(db_path);
        }
        if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            cfg.port = port;
        }

        Ok(cfg)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use std::io::Write;

    #[test]
    fn test_parse_snake_case_keys() {
        let cfg = Config::from_toml("db_path = \"data.sqlite\"\nport = 3000\n").unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("data.sqlite"));
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.listen_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_parse_legacy_keys() {
        let raw = "DbPath = \"/var/lib/saver.sqlite\"\nPort = 8080\nhost = \"127.0.0.1\"\n";
        let cfg = Config::from_toml(raw).unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("/var/lib/saver.sqlite"));
        assert_eq!(cfg.listen_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_missing_port_is_rejected() {
        assert!(matches!(
            Config::from_toml("db_path = \"data.sqlite\"\n"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        assert!(Config::from_toml("port = \"not a number\"\ndb_path = 1").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "db_path = \"readings.sqlite\"").unwrap();
        writeln!(file, "port = 4000").unwrap();

        let cfg = Config::load(file.path()).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Config::load("/definitely/not/here/config.toml"),
            Err(Error::Io(_))
        ));
    }
}
