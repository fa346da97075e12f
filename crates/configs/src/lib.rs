use anyhow::Result;
use serde::{Deserialize, Serialize};
use anyhow::anyhow;

pub const DEFAULT_SEED: [&str; 4] = ["Cafe Cereza", "Cafe Ganador", "Cafe Lareno", "Cafe Tres Pontas"];

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub greeting: GreetingConfig,
    #[serde(default)]
    pub droid: DroidConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Which `CoffeeRepository` backs the service.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Json,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("unknown storage backend `{other}` (expected memory|json)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_storage_path")]
    pub path: String,
    #[serde(default = "default_seed")]
    pub seed: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: StorageBackend::default(), path: default_storage_path(), seed: default_seed() }
    }
}

fn default_storage_path() -> String { "data/coffees.json".into() }
fn default_seed() -> Vec<String> { DEFAULT_SEED.iter().map(|s| s.to_string()).collect() }

/// Values served by `/greeting` and `/greeting/coffee`.
/// An unset `coffee` is derived from `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct GreetingConfig {
    #[serde(default = "default_greeting_name")]
    pub name: String,
    #[serde(default)]
    pub coffee: Option<String>,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self { name: default_greeting_name(), coffee: None }
    }
}

fn default_greeting_name() -> String { "Mirage".into() }

impl GreetingConfig {
    pub fn coffee(&self) -> String {
        match &self.coffee {
            Some(c) if !c.trim().is_empty() => c.clone(),
            _ => format!("{} is drinking Cafe Ganador", self.name),
        }
    }
}

/// Served as-is by `/droid`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DroidConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
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
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults plus
    /// environment variables when the file is absent.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::from_env()?,
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Result<Self> {
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
        if let Ok(backend) = std::env::var("STORAGE_BACKEND") {
            cfg.storage.backend = backend.parse()?;
        }
        if let Ok(path) = std::env::var("STORAGE_PATH") {
            cfg.storage.path = path;
        }
        if let Ok(name) = std::env::var("GREETING_NAME") {
            cfg.greeting.name = name;
        }
        if let Ok(coffee) = std::env::var("GREETING_COFFEE") {
            cfg.greeting.coffee = Some(coffee);
        }
        if let Ok(id) = std::env::var("DROID_ID") {
            cfg.droid.id = id;
        }
        if let Ok(description) = std::env::var("DROID_DESCRIPTION") {
            cfg.droid.description = description;
        }
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        self.greeting.normalize();
        Ok(())
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.backend == StorageBackend::Json && self.path.trim().is_empty() {
            return Err(anyhow!("storage.path is empty; the json backend needs a file path"));
        }
        Ok(())
    }
}

impl GreetingConfig {
    fn normalize(&mut self) {
        if self.name.trim().is_empty() {
            self.name = default_greeting_name();
        }
        self.coffee = Some(self.coffee());
    }
}
