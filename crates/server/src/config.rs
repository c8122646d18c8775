use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_ADVISOR_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Directory holding the registry database and per-tenant databases.
    pub data_dir: PathBuf,
    pub advisor_url: String,
    pub advisor_api_key: String,
    pub advisor_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let advisor_url = env::var("ADVISOR_URL")
            .map_err(|_| anyhow::anyhow!("ADVISOR_URL must be set"))?;
        let advisor_api_key = env::var("ADVISOR_API_KEY")
            .map_err(|_| anyhow::anyhow!("ADVISOR_API_KEY must be set"))?;

        let advisor_timeout = match env::var("ADVISOR_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(raw.parse()?),
            Err(_) => Duration::from_secs(DEFAULT_ADVISOR_TIMEOUT_SECS),
        };

        Ok(Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            advisor_url,
            advisor_api_key,
            advisor_timeout,
        })
    }

    pub fn registry_url(&self) -> String {
        format!("sqlite:{}", self.data_dir.join("registry.db").display())
    }
}
