use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const ENV_PREFIX: &str = "HEATPUMP__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub plot: PlotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address; `auto` picks the LAN address
    pub host: String,
    /// `0` binds an ephemeral port
    pub port: u16,
    pub enable_cors: bool,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            enable_cors: false,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = if self.host.eq_ignore_ascii_case("auto") {
            local_ip().unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
        } else {
            self.host.parse()?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Address of the interface that routes to the public internet.
///
/// Connecting a UDP socket sends no packets; it only resolves the route.
pub fn local_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).ok()?;
    socket.connect(("8.8.8.8", 80)).ok()?;
    socket.local_addr().ok().map(|addr| addr.ip())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./Data/combined_dataset.csv"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

impl Config {
    /// Defaults, then `config/default.toml` if present, then `HEATPUMP__*` variables
    pub fn load() -> Result<Self> {
        Ok(Self::figment(DEFAULT_CONFIG_PATH).extract()?)
    }

    /// Like [`Config::load`], but the given file must exist
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            bail!("configuration file not found: {}", path.display());
        }
        Ok(Self::figment(path).extract()?)
    }

    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let cfg = Config::load().expect("defaults");
            assert_eq!(cfg.server.host, "127.0.0.1");
            assert_eq!(cfg.server.port, 8000);
            assert_eq!(cfg.dataset.path, PathBuf::from("./Data/combined_dataset.csv"));
            assert_eq!((cfg.plot.width, cfg.plot.height), (1000, 600));
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_must_exist() {
        Jail::expect_with(|_jail| {
            let err = Config::load_from("typo.toml").unwrap_err();
            assert!(err.to_string().contains("typo.toml"));
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "service.toml",
                r#"
                [server]
                port = 9100

                [dataset]
                path = "data/readings.parquet"
                "#,
            )?;
            jail.set_env("HEATPUMP__SERVER__PORT", "9200");
            jail.set_env("HEATPUMP__PLOT__WIDTH", "800");

            let cfg = Config::load_from("service.toml").expect("config");
            assert_eq!(cfg.server.port, 9200);
            assert_eq!(cfg.server.host, "127.0.0.1");
            assert_eq!(cfg.dataset.path, PathBuf::from("data/readings.parquet"));
            assert_eq!(cfg.plot.width, 800);
            assert_eq!(cfg.plot.height, 600);
            Ok(())
        });
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig {
            host: "0.0.0.0".into(),
            port: 0,
            ..ServerConfig::default()
        };
        assert_eq!(server.socket_addr().unwrap().to_string(), "0.0.0.0:0");

        let bad = ServerConfig {
            host: "not-an-ip".into(),
            ..ServerConfig::default()
        };
        assert!(bad.socket_addr().is_err());
    }
}
