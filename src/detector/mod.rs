//! Crawler detection from user-agent strings
//!
//! Rules are checked in order and the first match wins, so more specific
//! agents (e.g. "Google-Extended") must precede broader ones ("Googlebot").

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Broad category of a crawler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlerKind {
    SearchEngine,
    Llm,
    Social,
    Other,
    Unknown,
}

impl CrawlerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrawlerKind::SearchEngine => "search_engine",
            CrawlerKind::Llm => "llm",
            CrawlerKind::Social => "social",
            CrawlerKind::Other => "other",
            CrawlerKind::Unknown => "unknown",
        }
    }
}

/// Identity of a detected crawler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrawlerInfo {
    pub name: &'static str,
    pub company: &'static str,
    pub kind: CrawlerKind,
}

impl CrawlerInfo {
    const fn new(name: &'static str, company: &'static str, kind: CrawlerKind) -> Self {
        Self {
            name,
            company,
            kind,
        }
    }
}

const UNKNOWN: CrawlerInfo = CrawlerInfo::new("Unknown", "Unknown", CrawlerKind::Unknown);
const GENERIC_BOT: CrawlerInfo = CrawlerInfo::new("Generic Bot", "Unknown", CrawlerKind::Other);

lazy_static! {
    static ref RULES: Vec<(Regex, CrawlerInfo)> = vec![
        // LLM crawlers
        rule(r"(?i)GPTBot", "GPTBot", "OpenAI", CrawlerKind::Llm),
        rule(r"(?i)ClaudeBot", "ClaudeBot", "Anthropic", CrawlerKind::Llm),
        rule(r"(?i)anthropic-ai", "Anthropic AI", "Anthropic", CrawlerKind::Llm),
        rule(r"(?i)Google-Extended", "Google-Extended", "Google", CrawlerKind::Llm),
        // Search engines
        rule(r"(?i)Googlebot", "Googlebot", "Google", CrawlerKind::SearchEngine),
        rule(r"(?i)bingbot", "Bingbot", "Microsoft", CrawlerKind::SearchEngine),
        rule(r"(?i)Yandex", "YandexBot", "Yandex", CrawlerKind::SearchEngine),
        rule(r"(?i)DuckDuckBot", "DuckDuckBot", "DuckDuckGo", CrawlerKind::SearchEngine),
        // Social
        rule(r"(?i)facebookexternalhit", "FacebookBot", "Meta", CrawlerKind::Social),
        rule(r"(?i)Twitterbot", "Twitterbot", "Twitter/X", CrawlerKind::Social),
    ];
    static ref GENERIC_BOT_PATTERN: Regex = Regex::new(r"(?i)bot|crawl|spider|slurp").unwrap();
}

fn rule(
    pattern: &str,
    name: &'static str,
    company: &'static str,
    kind: CrawlerKind,
) -> (Regex, CrawlerInfo) {
    (
        Regex::new(pattern).unwrap(),
        CrawlerInfo::new(name, company, kind),
    )
}

/// Identifies the crawler behind a user-agent string
///
/// Unrecognized agents that still look automated are reported as
/// "Generic Bot"; everything else (including an empty agent) is "Unknown".
pub fn identify(user_agent: &str) -> CrawlerInfo {
    if user_agent.trim().is_empty() {
        return UNKNOWN;
    }

    if let Some((_, info)) = RULES.iter().find(|(pattern, _)| pattern.is_match(user_agent)) {
        return *info;
    }

    if GENERIC_BOT_PATTERN.is_match(user_agent) {
        return GENERIC_BOT;
    }

    UNKNOWN
}

/// Looks up the identity behind a stored crawler id
///
/// Ids produced by `identify` map back to their rule. Anything else is
/// treated as a user-agent fragment.
pub fn classify(crawler_id: &str) -> CrawlerInfo {
    let id = crawler_id.trim();
    RULES
        .iter()
        .map(|(_, info)| info)
        .chain([&GENERIC_BOT, &UNKNOWN])
        .find(|info| info.name.eq_ignore_ascii_case(id))
        .copied()
        .unwrap_or_else(|| identify(id))
}
