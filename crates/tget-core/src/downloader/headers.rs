//! Response header collection and `Content-Length` parsing.

use std::str;

/// Why the declared size is unknown. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentLengthError {
    #[error("no content-length header found")]
    Missing,
    #[error("content-length not an integer: {0:?}")]
    NotAnInteger(String),
}

/// Header lines of the final response. A new status line (after a redirect or
/// a proxy CONNECT) discards the lines collected so far.
#[derive(Debug, Default)]
pub(crate) struct ResponseHeaders {
    lines: Vec<String>,
}

impl ResponseHeaders {
    /// Feed one raw header line as delivered by libcurl.
    pub(crate) fn push_raw(&mut self, data: &[u8]) {
        let Ok(s) = str::from_utf8(data) else {
            return;
        };
        let line = s.trim_end();
        if line.starts_with("HTTP/") {
            self.lines.clear();
        }
        if !line.is_empty() {
            self.lines.push(line.to_string());
        }
    }

    pub(crate) fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// First `Content-Length` value, matched case-insensitively.
pub fn parse_content_length(lines: &[String]) -> Result<u64, ContentLengthError> {
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("content-length") {
            let value = value.trim();
            return value
                .parse::<u64>()
                .map_err(|_| ContentLengthError::NotAnInteger(value.to_string()));
        }
    }
    Err(ContentLengthError::Missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn content_length_any_case() {
        let l = lines(&["HTTP/1.1 200 OK", "content-LENGTH:  2097152 "]);
        assert_eq!(parse_content_length(&l), Ok(2_097_152));
    }

    #[test]
    fn content_length_missing() {
        let l = lines(&["HTTP/1.1 200 OK", "Content-Type: text/plain"]);
        assert_eq!(parse_content_length(&l), Err(ContentLengthError::Missing));
    }

    #[test]
    fn content_length_not_integer() {
        let l = lines(&["Content-Length: 12kb"]);
        assert_eq!(
            parse_content_length(&l),
            Err(ContentLengthError::NotAnInteger("12kb".to_string()))
        );
        let neg = lines(&["Content-Length: -1"]);
        assert!(parse_content_length(&neg).is_err());
    }

    #[test]
    fn redirect_headers_are_discarded() {
        let mut h = ResponseHeaders::default();
        for raw in [
            "HTTP/1.1 302 Found\r\n",
            "Location: /real.bin\r\n",
            "Content-Length: 5\r\n",
            "\r\n",
            "HTTP/1.1 200 OK\r\n",
            "Content-Length: 4096\r\n",
            "\r\n",
        ] {
            h.push_raw(raw.as_bytes());
        }
        assert_eq!(h.lines().len(), 2);
        assert_eq!(parse_content_length(h.lines()), Ok(4096));
    }

    #[test]
    fn non_utf8_lines_are_skipped() {
        let mut h = ResponseHeaders::default();
        h.push_raw(b"HTTP/1.1 200 OK\r\n");
        h.push_raw(b"X-Bin: \xff\xfe\r\n");
        assert_eq!(h.lines(), ["HTTP/1.1 200 OK".to_string()]);
    }
}
