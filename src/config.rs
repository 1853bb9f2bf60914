use std::env;
use std::string::String;

#[derive(Debug)]
pub struct Config {
    pub api_key: String,
    pub api_host: String,
}

impl Config {
    pub fn load_from_env() -> Result<Config, String> {
        let api_key =
            env::var("DD_API_KEY").map_err(|e| format!("DD_API_KEY is not set: {}", e))?;
        let api_host =
            env::var("DD_HOSTNAME").unwrap_or_else(|_| "api.datadoghq.com".to_string());

        Ok(Config { api_key, api_host })
    }

    /// Base URL of the Datadog API. A host configured with an explicit
    /// scheme is used verbatim, otherwise https is assumed.
    pub fn base_url(&self) -> String {
        if self.api_host.starts_with("http://") || self.api_host.starts_with("https://") {
            self.api_host.clone()
        } else {
            format!("https://{}", self.api_host)
        }
    }
}

impl Clone for Config {
    fn clone(&self) -> Self {
        Config {
            api_key: self.api_key.clone(),
            api_host: self.api_host.clone(),
        }
    }
}
