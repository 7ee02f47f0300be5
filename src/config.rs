//! Deployment settings for the handler, read from the `CONVERTER` var.

use serde::Deserialize;
use worker::{console_log, Env};

const CONFIG_VAR: &str = "CONVERTER";

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; Cloudflare-Workers/1.0; +https://cloudflare.com)";
const DEFAULT_ALLOW_ORIGIN: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HandlerConfig {
    /// `User-Agent` sent when fetching the source list
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// `Access-Control-Allow-Origin` on converted lists
    #[serde(default = "default_allow_origin")]
    pub allow_origin: String,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_allow_origin() -> String {
    DEFAULT_ALLOW_ORIGIN.to_string()
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            allow_origin: default_allow_origin(),
        }
    }
}

impl HandlerConfig {
    /// Load from the worker environment, falling back to defaults.
    pub fn from_env(env: &Env) -> Self {
        match env.object_var::<HandlerConfig>(CONFIG_VAR) {
            Ok(config) => config,
            Err(e) => {
                console_log!("{} not usable ({}), using defaults", CONFIG_VAR, e);
                Self::default()
            }
        }
    }
}
