//! Ingress selection: webhook or long polling, decided once at startup from validated config.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use tracing::warn;
use unishark_core::{BotError, Result};
use url::{Host, Url};

use crate::config::TelegramConfig;

/// Requested delivery mode (CLI `--mode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngressMode {
    /// Webhook when a usable public WEBHOOK_URL is configured, otherwise polling.
    #[default]
    Auto,
    Webhook,
    Polling,
}

impl FromStr for IngressMode {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "webhook" => Ok(Self::Webhook),
            "polling" | "poll" => Ok(Self::Polling),
            other => Err(BotError::Config(format!(
                "unknown mode {:?} (expected auto, webhook or polling)",
                other
            ))),
        }
    }
}

impl fmt::Display for IngressMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auto => "auto",
            Self::Webhook => "webhook",
            Self::Polling => "polling",
        };
        f.write_str(name)
    }
}

/// Where the webhook listener binds and what Telegram is told to call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookTarget {
    /// Full callback URL registered with setWebhook (base URL + path).
    pub callback_url: Url,
    /// Path served by the listener; always the path of `callback_url`, base path included.
    pub path: String,
    pub listen_addr: SocketAddr,
}

/// Selected ingress variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ingress {
    Webhook(WebhookTarget),
    Polling,
}

impl Ingress {
    /// Picks the ingress for `config` and `mode`. Forced webhook mode without a usable URL is a config error;
    /// auto mode falls back to polling.
    pub fn select(config: &TelegramConfig, mode: IngressMode) -> Result<Self> {
        match mode {
            IngressMode::Polling => Ok(Self::Polling),
            IngressMode::Webhook => match &config.webhook_url {
                Some(base) => Ok(Self::Webhook(webhook_target(config, base)?)),
                None => Err(BotError::Config(
                    "webhook mode requires WEBHOOK_URL".to_string(),
                )),
            },
            IngressMode::Auto => match &config.webhook_url {
                None => Ok(Self::Polling),
                Some(base) => match webhook_target(config, base) {
                    Ok(target) => Ok(Self::Webhook(target)),
                    Err(e) => {
                        warn!(error = %e, "WEBHOOK_URL not usable, falling back to polling");
                        Ok(Self::Polling)
                    }
                },
            },
        }
    }

    pub fn is_webhook(&self) -> bool {
        matches!(self, Self::Webhook(_))
    }
}

fn webhook_target(config: &TelegramConfig, base: &str) -> Result<WebhookTarget> {
    let base_url = Url::parse(base)
        .map_err(|e| BotError::Config(format!("WEBHOOK_URL is not a valid URL: {}", e)))?;
    if base_url.scheme() != "https" {
        return Err(BotError::Config(format!(
            "WEBHOOK_URL must use https, got {}",
            base_url.scheme()
        )));
    }
    if is_local_host(&base_url) {
        return Err(BotError::Config(format!(
            "WEBHOOK_URL points at a local address: {}",
            base_url.host_str().unwrap_or_default()
        )));
    }

    let callback = format!(
        "{}{}",
        base_url.as_str().trim_end_matches('/'),
        config.webhook_path()
    );
    let callback_url = Url::parse(&callback)
        .map_err(|e| BotError::Config(format!("invalid webhook callback URL: {}", e)))?;
    if callback_url.query().is_some() || callback_url.fragment().is_some() {
        return Err(BotError::Config(
            "WEBHOOK_URL must not carry a query or fragment".to_string(),
        ));
    }

    // Telegram posts to the callback path, so the listener routes on exactly that path.
    let path = callback_url.path().to_string();
    if path.split('/').any(|segment| segment.starts_with([':', '*'])) {
        return Err(BotError::Config(format!(
            "webhook path segments must not start with ':' or '*': {}",
            path
        )));
    }

    Ok(WebhookTarget {
        callback_url,
        path,
        listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), config.port),
    })
}

/// True when Telegram could not reach the host: loopback, unspecified, private or link-local addresses.
pub fn is_local_host(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.to_ascii_lowercase();
            domain == "localhost" || domain.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => {
            ip.is_loopback() || ip.is_unspecified() || ip.is_private() || ip.is_link_local()
        }
        Some(Host::Ipv6(ip)) => ip.is_loopback() || ip.is_unspecified(),
        None => true,
    }
}
