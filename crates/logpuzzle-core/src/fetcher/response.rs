//! Parse HTTP response header lines into a ResponseHead.

/// Status line and the headers the fetcher cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    /// Status code from the `HTTP/x y` line, if seen.
    pub status: Option<u32>,
    /// Declared body size, if `Content-Length` is present.
    pub content_length: Option<u64>,
    /// `Content-Type` value if present (logged only).
    pub content_type: Option<String>,
}

impl ResponseHead {
    /// True for 2xx, and for a head with no status line yet.
    pub fn is_success(&self) -> bool {
        self.status.map_or(true, |s| (200..300).contains(&s))
    }
}

/// True if `line` starts a new response (first line of each hop in a redirect chain).
pub(crate) fn is_status_line(line: &str) -> bool {
    line.starts_with("HTTP/")
}

/// Parse collected header lines of one response into ResponseHead.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseHead {
    let mut head = ResponseHead::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_status_line(line) {
            head.status = line
                .split_whitespace()
                .nth(1)
                .and_then(|code| code.parse::<u32>().ok());
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    head.content_length = Some(n);
                }
            }
            if name.eq_ignore_ascii_case("content-type") {
                head.content_type = Some(value.to_string());
            }
        }
    }

    head
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_status_and_length() {
        let head = parse_headers(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Length: 12345",
            "Content-Type: image/jpeg",
        ]));
        assert_eq!(head.status, Some(200));
        assert_eq!(head.content_length, Some(12345));
        assert_eq!(head.content_type.as_deref(), Some("image/jpeg"));
        assert!(head.is_success());
    }

    #[test]
    fn parse_http2_status_and_case() {
        let head = parse_headers(&lines(&["HTTP/2 404", "content-length: 9"]));
        assert_eq!(head.status, Some(404));
        assert_eq!(head.content_length, Some(9));
        assert!(!head.is_success());
    }

    #[test]
    fn missing_or_bad_length() {
        let head = parse_headers(&lines(&["HTTP/1.0 200 OK", "Content-Length: lots"]));
        assert_eq!(head.content_length, None);
        assert!(parse_headers(&[]).is_success());
    }
}
