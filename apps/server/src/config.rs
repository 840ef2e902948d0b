use std::{net::SocketAddr, time::Duration};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub snapshot_path: String,
    pub catalog_file: Option<String>,
    pub cycle_interval: Duration,
    pub fetch_timeout: Duration,
    pub max_concurrent_fetches: usize,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("RW_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid RW_LISTEN_ADDR");
        let snapshot_path =
            std::env::var("RW_SNAPSHOT_PATH").unwrap_or_else(|_| "./data/fx_rates.json".into());
        let catalog_file = std::env::var("RW_CATALOG_FILE").ok().filter(|s| !s.is_empty());
        let cycle_interval_secs: u64 = std::env::var("RW_CYCLE_INTERVAL_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .unwrap_or(300);
        let fetch_timeout_ms: u64 = std::env::var("RW_FETCH_TIMEOUT_MS")
            .unwrap_or_else(|_| "25000".into())
            .parse()
            .unwrap_or(25000);
        let max_concurrent_fetches: usize = std::env::var("RW_MAX_CONCURRENT_FETCHES")
            .unwrap_or_else(|_| "4".into())
            .parse()
            .unwrap_or(4);
        let cors_allow = std::env::var("RW_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let request_timeout_ms: u64 = std::env::var("RW_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        Self {
            listen_addr,
            snapshot_path,
            catalog_file,
            cycle_interval: Duration::from_secs(cycle_interval_secs),
            fetch_timeout: Duration::from_millis(fetch_timeout_ms),
            max_concurrent_fetches,
            cors_allow,
            request_timeout: Duration::from_millis(request_timeout_ms),
        }
    }
}
