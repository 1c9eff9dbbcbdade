use anyhow::{bail, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};

use crate::urls;

/// Server settings. Every flag can also come from the environment (or a `.env` file).
#[derive(Parser, Debug, Clone)]
#[command(name = "testing-api")]
#[command(about = "Testing API backend")]
pub struct Settings {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Verbose not-found pages and debug-level logging
    #[arg(
        long,
        env = "DEBUG",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub debug: bool,

    /// Comma-separated Host header allow list. `*` accepts any host,
    /// `.example.com` accepts the domain and all of its subdomains.
    #[arg(long, env = "ALLOWED_HOSTS", value_delimiter = ',', default_value = "*")]
    pub allowed_hosts: Vec<String>,

    /// Allow cross-origin requests from any origin
    #[arg(
        long,
        env = "CORS_ALLOW_ALL_ORIGINS",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub cors_allow_all_origins: bool,

    /// Redirect `/path` to `/path/` when only the latter is routed
    #[arg(
        long,
        env = "APPEND_SLASH",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub append_slash: bool,

    /// URL prefix static assets are served under
    #[arg(long, env = "STATIC_URL", default_value = "static/")]
    pub static_url: String,

    /// Directory static assets are read from, relative to the working directory
    #[arg(long, env = "STATIC_ROOT", default_value = "static")]
    pub static_root: String,
}

impl Settings {
    /// Normalize and check the parsed settings.
    ///
    /// `static_url` always ends up with a leading and trailing slash, so
    /// `static/` becomes `/static/`.
    pub fn validate(mut self) -> Result<Self> {
        let trimmed = self.static_url.trim().trim_matches('/');
        if trimmed.is_empty() {
            bail!("STATIC_URL must name a path below the site root");
        }
        if trimmed.contains([':', '*', '{', '}']) {
            bail!("STATIC_URL must not contain path parameters or wildcards: {}", trimmed);
        }
        if trimmed.split('/').any(str::is_empty) {
            bail!("STATIC_URL must not contain empty path segments: {}", trimmed);
        }
        self.static_url = format!("/{}/", trimmed);
        let mount = self.static_mount();
        if let Some(route) = urls::ROUTES
            .iter()
            .find(|r| r.starts_with(&format!("{}/", mount)))
        {
            bail!("STATIC_URL {} overlaps the {} route", self.static_url, route);
        }

        self.allowed_hosts = self
            .allowed_hosts
            .into_iter()
            .map(|h| h.trim().to_ascii_lowercase())
            .filter(|h| !h.is_empty())
            .collect();
        if self.allowed_hosts.is_empty() {
            bail!("ALLOWED_HOSTS must contain at least one entry (use `*` to allow any host)");
        }

        Ok(self)
    }

    /// Path the static file service is nested at, e.g. `/static`.
    pub fn static_mount(&self) -> String {
        self.static_url.trim_end_matches('/').to_string()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allows_any_host(&self) -> bool {
        self.allowed_hosts.iter().any(|h| h == "*")
    }
}

#[cfg(test)]
pub(crate) fn test_settings() -> Settings {
    Settings {
        host: "127.0.0.1".to_string(),
        port: 8000,
        debug: true,
        allowed_hosts: vec!["*".to_string()],
        cors_allow_all_origins: true,
        append_slash: true,
        static_url: "static/".to_string(),
        static_root: "static".to_string(),
    }
    .validate()
    .unwrap()
}
