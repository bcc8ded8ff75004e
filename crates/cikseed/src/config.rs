use anyhow::{anyhow, Context};
use cikseed_spider::fetcher::{DEFAULT_DELAY, SUBMISSIONS_URL};
use cikseed_spider::resolver::CONSTITUENTS_URL;
use std::time::Duration;
use tokio_postgres::config::SslMode;
use tokio_postgres::{self as pg};

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug)]
pub struct Settings {
    pub database: pg::Config,
    pub user_agent: String,
    pub delay: Duration,
    pub submissions_url: String,
    pub constituents_url: String,
    pub timeout: Option<Duration>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| dotenv::var(key).ok().filter(|value| !value.is_empty()))
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let require =
            |key: &str| get(key).ok_or_else(|| anyhow!("environment variable {key} must be specified"));

        let database = match get("DATABASE_URL") {
            Some(url) => url
                .parse::<pg::Config>()
                .context("environment variable DATABASE_URL is not a valid connection string")?,
            None => {
                let port = match get("DB_PORT") {
                    Some(port) => port
                        .parse::<u16>()
                        .with_context(|| format!("environment variable DB_PORT={port:?}"))?,
                    None => 5432,
                };
                let ssl_mode = match get("DB_SSLMODE").as_deref() {
                    None | Some("disable") => SslMode::Disable,
                    Some("prefer") => SslMode::Prefer,
                    Some(other) => {
                        return Err(anyhow!(
                            "environment variable DB_SSLMODE={other:?}, expected disable or prefer"
                        ))
                    }
                };

                let mut config = pg::Config::new();
                config
                    .host(&require("DB_HOST")?)
                    .port(port)
                    .dbname(&require("DB_NAME")?)
                    .user(&require("DB_USER")?)
                    .password(require("DB_PASS")?)
                    .ssl_mode(ssl_mode);
                config
            }
        };

        // connections are made with NoTls
        if database.get_ssl_mode() == SslMode::Require {
            return Err(anyhow!(
                "sslmode=require is not supported, connections are made without TLS"
            ));
        }

        let delay = match get("SEC_DELAY_MS") {
            Some(ms) => Duration::from_millis(
                ms.parse()
                    .with_context(|| format!("environment variable SEC_DELAY_MS={ms:?}"))?,
            ),
            None => DEFAULT_DELAY,
        };

        let timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(secs) => Some(Duration::from_secs(
                secs.parse()
                    .with_context(|| format!("environment variable HTTP_TIMEOUT_SECS={secs:?}"))?,
            )),
            None => None,
        };

        Ok(Self {
            database,
            user_agent: require("USER_AGENT")?,
            delay,
            submissions_url: get("SEC_SUBMISSIONS_URL").unwrap_or_else(|| SUBMISSIONS_URL.into()),
            constituents_url: get("CONSTITUENTS_URL").unwrap_or_else(|| CONSTITUENTS_URL.into()),
            timeout,
        })
    }
}
