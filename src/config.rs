use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Application-level constants
pub const APP_NAME: &str = "Symptom Chat";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment overrides for the artifact locations.
pub const MODEL_PATH_ENV: &str = "MODEL_PATH";
pub const VECTORIZER_PATH_ENV: &str = "VECTORIZER_PATH";

/// Persistent-disk locations, used when no override is set.
pub const DISK_MODEL_PATH: &str = "/data/models/model.json";
pub const DISK_VECTORIZER_PATH: &str = "/data/models/vectorizer.json";

/// Repository-local fallbacks.
pub const LOCAL_MODEL_PATH: &str = "model.json";
pub const LOCAL_VECTORIZER_PATH: &str = "vectorizer.json";

pub const BIND_ADDR_ENV: &str = "SYMPTOM_CHAT_ADDR";
pub const PORT_ENV: &str = "PORT";
pub const DEFAULT_PORT: u16 = 5000;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "symptom_chat_lib=info,tower_http=info"
}

/// Resolved locations of the classifier and encoder artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub vectorizer: PathBuf,
}

impl ArtifactPaths {
    /// Resolve both artifacts from the process environment.
    pub fn from_env() -> Self {
        Self {
            model: resolve_artifact(
                std::env::var_os(MODEL_PATH_ENV).map(PathBuf::from),
                Path::new(DISK_MODEL_PATH),
                Path::new(LOCAL_MODEL_PATH),
            ),
            vectorizer: resolve_artifact(
                std::env::var_os(VECTORIZER_PATH_ENV).map(PathBuf::from),
                Path::new(DISK_VECTORIZER_PATH),
                Path::new(LOCAL_VECTORIZER_PATH),
            ),
        }
    }

    /// Paths among the two that do not exist on disk.
    pub fn missing(&self) -> Vec<&Path> {
        [self.model.as_path(), self.vectorizer.as_path()]
            .into_iter()
            .filter(|p| !p.exists())
            .collect()
    }
}

/// Pick the override (or the disk default when no override is given) if it
/// exists, otherwise the repository-local file.
pub fn resolve_artifact(preferred: Option<PathBuf>, disk: &Path, local: &Path) -> PathBuf {
    let candidate = preferred.unwrap_or_else(|| disk.to_path_buf());
    if candidate.exists() {
        candidate
    } else {
        local.to_path_buf()
    }
}

/// Socket address to serve on, from `SYMPTOM_CHAT_ADDR` and `PORT`.
pub fn bind_addr() -> Result<SocketAddr, String> {
    parse_bind_addr(
        std::env::var(BIND_ADDR_ENV).ok().as_deref(),
        std::env::var(PORT_ENV).ok().as_deref(),
    )
}

pub fn parse_bind_addr(host: Option<&str>, port: Option<&str>) -> Result<SocketAddr, String> {
    let ip = match host {
        Some(h) => h
            .parse::<IpAddr>()
            .map_err(|e| format!("Invalid {BIND_ADDR_ENV} '{h}': {e}"))?,
        None => IpAddr::V4(Ipv4Addr::LOCALHOST),
    };
    let port = match port {
        Some(p) => p
            .parse::<u16>()
            .map_err(|e| format!("Invalid {PORT_ENV} '{p}': {e}"))?,
        None => DEFAULT_PORT,
    };
    Ok(SocketAddr::new(ip, port))
}
