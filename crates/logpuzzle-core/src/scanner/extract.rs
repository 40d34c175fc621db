//! Puzzle request-path extraction from raw log text.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn request_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"GET\s(\S+puzzle\S+)\sHTTP").expect("valid request regex"))
}

/// Returns every `GET <path> HTTP` path containing "puzzle", in log order
/// (duplicates included).
pub fn puzzle_paths(log: &str) -> Vec<&str> {
    request_pattern()
        .captures_iter(log)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Joins each path onto `http://<host>`, keeping the first occurrence of
/// every URL.
pub fn build_urls<'a, I>(host: &str, paths: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    for path in paths {
        let url = format!("http://{}{}", host, path);
        if seen.insert(url.clone()) {
            urls.push(url);
        }
    }
    urls
}
