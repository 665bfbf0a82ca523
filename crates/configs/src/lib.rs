use std::path::{Path, PathBuf};

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

/// Where the employee collection lives and how its keys are read back.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Match record field names ignoring ASCII case when loading the file.
    #[serde(default = "default_case_insensitive_keys")]
    pub case_insensitive_keys: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_file: default_data_file(), case_insensitive_keys: default_case_insensitive_keys() }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }
fn default_data_file() -> PathBuf { PathBuf::from("data/employees.json") }
fn default_case_insensitive_keys() -> bool { true }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file at `CONFIG_PATH` (default `config.toml`) first; only when
    /// that file does not exist, build one from `SERVER_HOST`, `SERVER_PORT`
    /// and `EMPLOYEES_FILE`. A file that exists but cannot be read or parsed
    /// is an error.
    pub fn load_or_env() -> Result<Self> {
        Self::load_from_path_or_env(Path::new(&config_path()))
    }

    pub fn load_from_path_or_env(path: &Path) -> Result<Self> {
        let mut cfg = match std::fs::read_to_string(path) {
            Ok(content) => parse(&content).map_err(|e| anyhow!("invalid config {}: {e}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::from_env(),
            Err(e) => return Err(anyhow!("cannot read config {}: {e}", path.display())),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Ok(file) = std::env::var("EMPLOYEES_FILE") {
            cfg.storage.data_file = PathBuf::from(file);
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(anyhow!("storage.data_file is empty; set it in config.toml or EMPLOYEES_FILE"));
        }
        if self.data_file.is_dir() {
            return Err(anyhow!("storage.data_file {} is a directory", self.data_file.display()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let mut cfg = parse("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.storage.data_file, PathBuf::from("data/employees.json"));
        assert!(cfg.storage.case_insensitive_keys);
        assert!(!cfg.logging.json);
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn sections_override_defaults() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9090
            worker_threads = 2

            [storage]
            data_file = "/var/lib/employees/empleados.json"
            case_insensitive_keys = false

            [logging]
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9090");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.storage.data_file, PathBuf::from("/var/lib/employees/empleados.json"));
        assert!(!cfg.storage.case_insensitive_keys);
        assert!(cfg.logging.json);
    }

    #[test]
    fn blank_host_and_zero_threads_are_normalized() {
        let mut cfg = parse("[server]\nhost = \" \"\nport = 8081\nworker_threads = 0\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg = parse("[server]\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("employees_config_{}_{name}.toml", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let path = temp_config("malformed", "[storage]\ndata_file = 42\n[server\nport = 9999");
        std::env::set_var("CONFIG_PATH", &path);
        let result = AppConfig::load_or_env();
        std::env::remove_var("CONFIG_PATH");
        let _ = std::fs::remove_file(&path);
        assert!(result.is_err());
    }

    #[test]
    fn existing_config_file_wins() {
        let path = temp_config("valid", "[storage]\ndata_file = \"/srv/emp.json\"\n");
        let cfg = AppConfig::load_from_path_or_env(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(cfg.storage.data_file, PathBuf::from("/srv/emp.json"));
    }

    #[test]
    fn missing_config_file_falls_back() {
        let path = std::env::temp_dir().join("employees_config_does_not_exist.toml");
        let cfg = AppConfig::load_from_path_or_env(&path).unwrap();
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn empty_data_file_is_rejected() {
        let mut cfg = parse("[storage]\ndata_file = \"\"\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }
}
