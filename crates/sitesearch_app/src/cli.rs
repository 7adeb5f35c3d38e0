use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use sitesearch_client::{ClientSettings, BASE_URL_ENV, DEFAULT_BASE_URL};
use sitesearch_logging::LogDestination;

#[derive(Debug, Parser)]
#[command(
    name = "sitesearch",
    version,
    about = "Search a website's content through a sitesearch backend"
)]
pub struct Cli {
    /// Site to search. With --query, runs a single search and exits.
    #[arg(long)]
    pub url: Option<String>,

    /// Text to look for on the site.
    #[arg(long)]
    pub query: Option<String>,

    /// Base address of the search backend.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    /// Give up on a request after this many seconds (default: wait for the transport).
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            request_timeout: self.timeout_secs.map(Duration::from_secs),
            ..ClientSettings::with_base_url(self.api_base_url.clone())
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::Both(path.clone()),
            None => LogDestination::Terminal,
        }
    }

    /// `Some((url, query))` when both one-shot flags are present.
    pub fn one_shot(&self) -> Option<(&str, &str)> {
        match (&self.url, &self.query) {
            (Some(url), Some(query)) => Some((url.as_str(), query.as_str())),
            _ => None,
        }
    }
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search { url: String, query: String },
    /// 1-based rank as shown on screen.
    ToggleHtml(usize),
    Reset,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub const HELP: &str = "\
<url> <query...>  search the site for the query (replaces any running search)
:html N           show or hide the HTML of result N
:reset            clear the current search
:help             show this help
:quit             exit";

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    if let Some(rest) = line.strip_prefix(':') {
        let mut parts = rest.split_whitespace();
        return match (parts.next(), parts.next(), parts.next()) {
            (Some("quit" | "q" | "exit"), None, None) => Command::Quit,
            (Some("reset"), None, None) => Command::Reset,
            (Some("help" | "h" | "?"), None, None) => Command::Help,
            (Some("html"), Some(rank), None) => match rank.parse::<usize>() {
                Ok(rank) if rank > 0 => Command::ToggleHtml(rank),
                _ => Command::Unknown(line.to_string()),
            },
            _ => Command::Unknown(line.to_string()),
        };
    }

    // A URL without a query still goes to validation, which reports the missing query.
    let (url, query) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    Command::Search {
        url: url.to_string(),
        query: query.trim().to_string(),
    }
}
