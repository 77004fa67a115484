use clap::Parser;

use std::path::PathBuf;

use super::constants::{
    ENV_CONFIG, ENV_DB_MAX_CONNECTIONS, ENV_DEBUG, ENV_DEFAULT_PAGE_SIZE, ENV_HOST,
    ENV_LENIENT_EXPRESSIONS, ENV_MAX_PAGE_SIZE, ENV_PORT,
};

#[derive(Parser)]
#[command(name = "roster")]
#[command(version, about = "Account and department directory service", long_about = None)]
pub struct Cli {
    /// Server host address
    #[arg(long, short = 'H', env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', env = ENV_PORT)]
    pub port: Option<u16>,

    /// Enable debug mode (verbose request logging)
    #[arg(long, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Maximum SQLite pool connections
    #[arg(long, env = ENV_DB_MAX_CONNECTIONS)]
    pub db_max_connections: Option<u32>,

    /// Default page size for list endpoints
    #[arg(long, env = ENV_DEFAULT_PAGE_SIZE)]
    pub default_page_size: Option<u32>,

    /// Maximum page size for list endpoints
    #[arg(long, env = ENV_MAX_PAGE_SIZE)]
    pub max_page_size: Option<u32>,

    /// Return empty results instead of 400 for invalid filter expressions
    #[arg(long, env = ENV_LENIENT_EXPRESSIONS)]
    pub lenient_expressions: Option<bool>,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub db_max_connections: Option<u32>,
    pub default_page_size: Option<u32>,
    pub max_page_size: Option<u32>,
    pub lenient_expressions: Option<bool>,
}

/// Parse CLI arguments
pub fn parse() -> CliConfig {
    let cli = Cli::parse();
    CliConfig {
        host: cli.host,
        port: cli.port,
        debug: cli.debug,
        config: cli.config,
        db_max_connections: cli.db_max_connections,
        default_page_size: cli.default_page_size,
        max_page_size: cli.max_page_size,
        lenient_expressions: cli.lenient_expressions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_overrides() {
        let cli = Cli::try_parse_from([
            "roster",
            "--port",
            "9090",
            "--max-page-size",
            "100",
            "--lenient-expressions",
            "true",
        ])
        .unwrap();
        assert_eq!(cli.port, Some(9090));
        assert_eq!(cli.max_page_size, Some(100));
        assert_eq!(cli.lenient_expressions, Some(true));
        assert!(cli.host.is_none());
    }
}
