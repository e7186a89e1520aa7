use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4030";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SSE_KEEP_ALIVE_SECS: u64 = 15;

#[derive(Parser, Debug)]
#[command(name = "apidex-mcpd", version, about = "apidex MCP daemon.")]
struct CliArgs {
    /// TOML manifest listing the services whose OpenAPI documents to ingest.
    #[arg(long, env = "APIDEX_SERVICES_FILE")]
    services_file: PathBuf,

    #[arg(
        long = "stdio",
        env = "APIDEX_ENABLE_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "APIDEX_MCP_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(long, env = "APIDEX_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    /// Per-fetch timeout for URL sources; 0 disables the timeout.
    #[arg(
        long,
        env = "APIDEX_FETCH_TIMEOUT_SECS",
        default_value_t = DEFAULT_FETCH_TIMEOUT_SECS
    )]
    fetch_timeout_secs: u64,

    /// SSE keep-alive interval for the HTTP transport; 0 disables it.
    #[arg(
        long,
        env = "APIDEX_SSE_KEEP_ALIVE_SECS",
        default_value_t = DEFAULT_SSE_KEEP_ALIVE_SECS
    )]
    sse_keep_alive_secs: u64,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct ApidexConfig {
    pub services_file: PathBuf,
    pub enable_stdio: bool,
    pub mcp_serve: bool,
    pub mcp_http_addr: SocketAddr,
    pub fetch_timeout: Option<Duration>,
    pub sse_keep_alive: Option<Duration>,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl ApidexConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for ApidexConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if !args.enable_stdio && !args.mcp_serve {
            return Err(ConfigError::InvalidSetting {
                name: "APIDEX_ENABLE_STDIO/APIDEX_MCP_SERVE",
                value: "no transport enabled".to_string(),
            });
        }

        if args.services_file.as_os_str().is_empty() {
            return Err(ConfigError::MissingSetting("APIDEX_SERVICES_FILE"));
        }

        let fetch_timeout = if args.fetch_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(args.fetch_timeout_secs))
        };
        let sse_keep_alive = if args.sse_keep_alive_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(args.sse_keep_alive_secs))
        };

        Ok(Self {
            services_file: args.services_file,
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
            mcp_http_addr: args.mcp_http_addr,
            fetch_timeout,
            sse_keep_alive,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            services_file: PathBuf::from("services.toml"),
            enable_stdio: true,
            mcp_serve: false,
            mcp_http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            sse_keep_alive_secs: DEFAULT_SSE_KEEP_ALIVE_SECS,
        }
    }

    #[test]
    fn rejects_disabling_every_transport() {
        let mut args = base_args();
        args.enable_stdio = false;
        args.mcp_serve = false;

        assert!(ApidexConfig::try_from(args).is_err());
    }

    #[test]
    fn zero_timeout_disables_the_fetch_timeout() {
        let mut args = base_args();
        args.fetch_timeout_secs = 0;

        let config = ApidexConfig::try_from(args).expect("config should parse");
        assert!(config.fetch_timeout.is_none());
        assert_eq!(
            config.sse_keep_alive,
            Some(Duration::from_secs(DEFAULT_SSE_KEEP_ALIVE_SECS))
        );
    }
}
