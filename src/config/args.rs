//! Command-line interface definitions using clap

use clap::Parser;

use super::StaticConfig;
use crate::storage::StoreBackend;

/// Snaplink - A small URL shortener service
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "snaplink")]
#[command(version)]
#[command(about = "A small URL shortener service", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, short = 'c', default_value = "config.toml")]
    pub config: String,

    /// Listen address
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Storage backend: memory or sqlite
    #[arg(long)]
    pub db: Option<StoreBackend>,

    /// SQLite database file path
    #[arg(long = "db-path")]
    pub db_path: Option<String>,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub print_config: bool,
}

/// 命令行参数覆盖配置文件与环境变量
pub fn apply_cli_overrides(config: &mut StaticConfig, cli: &Cli) {
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(backend) = cli.db {
        config.storage.backend = backend;
    }
    if let Some(path) = &cli.db_path {
        config.storage.database_path = path.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["snaplink"]).unwrap();
        assert_eq!(cli.config, "config.toml");
        assert!(cli.port.is_none());
        assert!(cli.db.is_none());
        assert!(!cli.print_config);
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "snaplink",
            "-c",
            "custom.toml",
            "--port",
            "9000",
            "--db",
            "sqlite",
            "--db-path",
            "/tmp/x.db",
        ])
        .unwrap();
        assert_eq!(cli.config, "custom.toml");
        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.db, Some(StoreBackend::Sqlite));
        assert_eq!(cli.db_path.as_deref(), Some("/tmp/x.db"));
    }

    #[test]
    fn test_parse_rejects_unknown_backend() {
        assert!(Cli::try_parse_from(["snaplink", "--db", "postgres"]).is_err());
    }

    #[test]
    fn test_apply_cli_overrides() {
        let mut config = StaticConfig::default();
        let cli = Cli {
            port: Some(3000),
            db: Some(StoreBackend::Sqlite),
            db_path: Some("links.db".to_string()),
            ..Default::default()
        };
        apply_cli_overrides(&mut config, &cli);

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.backend, StoreBackend::Sqlite);
        assert_eq!(config.storage.database_path, "links.db");
    }
}
