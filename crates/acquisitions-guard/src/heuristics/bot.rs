//! User-Agent based automated-client detection.
//!
//! A request is classified as a bot when it carries no User-Agent at all or
//! when its User-Agent names a known scripting library, HTTP tool or generic
//! crawler. Search-engine crawlers and link-preview fetchers are let through.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Substrings (lowercase) identifying automated clients.
const BOT_MARKERS: &[&str] = &[
    "curl",
    "wget",
    "httpie",
    "python-requests",
    "python-urllib",
    "aiohttp",
    "httpx",
    "go-http-client",
    "java/",
    "okhttp",
    "apache-httpclient",
    "libwww-perl",
    "node-fetch",
    "axios",
    "undici",
    "postmanruntime",
    "insomnia",
    "scrapy",
    "headlesschrome",
    "phantomjs",
    "selenium",
    "puppeteer",
    "playwright",
    "masscan",
    "nmap",
    "sqlmap",
    "nikto",
    "zgrab",
    "crawler",
    "spider",
];

/// `bot` as its own word (`Bot 1.0`) or closing a product token
/// (`AhrefsBot/7.0`). Device names such as `CUBOT` or `Robot` don't match.
static GENERIC_BOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^a-z0-9])bot\b|bot/").unwrap_or_else(|err| panic!("invalid bot pattern: {err}"))
});

/// Crawlers that match a bot marker but are allowed anyway.
const ALLOWED_CRAWLERS: &[&str] = &[
    "googlebot",
    "bingbot",
    "duckduckbot",
    "yandexbot",
    "baiduspider",
    "applebot",
    "slurp",
    "facebookexternalhit",
    "twitterbot",
    "linkedinbot",
    "slackbot",
    "discordbot",
    "telegrambot",
    "whatsapp",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotSignal {
    MissingUserAgent,
    /// Matched marker.
    AutomatedClient(&'static str),
}

impl fmt::Display for BotSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotSignal::MissingUserAgent => f.write_str("missing user agent"),
            BotSignal::AutomatedClient(marker) => write!(f, "automated client ({marker})"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BotDetector;

impl BotDetector {
    pub fn new() -> Self {
        Self
    }

    /// Returns the reason `user_agent` looks automated, or `None` for clients
    /// that pass.
    pub fn classify(&self, user_agent: Option<&str>) -> Option<BotSignal> {
        let ua = match user_agent.map(str::trim) {
            Some(ua) if !ua.is_empty() => ua.to_ascii_lowercase(),
            _ => return Some(BotSignal::MissingUserAgent),
        };

        if ALLOWED_CRAWLERS.iter().any(|allowed| ua.contains(allowed)) {
            return None;
        }

        BOT_MARKERS
            .iter()
            .copied()
            .find(|marker| ua.contains(marker))
            .or_else(|| GENERIC_BOT.is_match(&ua).then_some("bot"))
            .map(BotSignal::AutomatedClient)
    }
}
