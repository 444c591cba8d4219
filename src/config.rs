use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Server part of every user and room id minted here.
    pub server_name: String,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let server_name = env::var("SERVER_NAME").unwrap_or_else(|_| "localhost".to_string());
        if server_name.is_empty()
            || server_name.contains("..")
            || server_name.chars().any(|c| c.is_whitespace() || c == ':')
        {
            return Err(ConfigError::InvalidServerName(server_name));
        }

        let log_format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("text") | Err(_) => LogFormat::Text,
            Ok(other) => return Err(ConfigError::InvalidLogFormat(other.to_string())),
        };

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            server_name,
            log_format,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            server_name: "localhost".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("Invalid SERVER_NAME: {0:?}")]
    InvalidServerName(String),
    #[error("LOG_FORMAT must be 'text' or 'json', got {0:?}")]
    InvalidLogFormat(String),
}
