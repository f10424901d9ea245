use core::fmt;

use heapless::{String, Vec};

/// Longest request path kept, query string excluded.
pub const MAX_PATH_LEN: usize = 64;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    /// Any method the server does not route.
    Other,
}

impl HttpMethod {
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            _ => HttpMethod::Other,
        }
    }
}

/// The parts of a request head the server routes on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub method: HttpMethod,
    /// Request target without the query string.
    pub path: String<MAX_PATH_LEN>,
    /// `0` when the header is absent or not a number.
    pub content_length: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadError {
    /// The request line is not `METHOD target HTTP/x.y`.
    Malformed,
    /// The request line or the path does not fit.
    UriTooLong,
    /// No blank line within the head size limit.
    TooLarge,
}

impl fmt::Display for HeadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadError::Malformed => write!(f, "malformed request line"),
            HeadError::UriTooLong => write!(f, "request target too long"),
            HeadError::TooLarge => write!(f, "request head too large"),
        }
    }
}

/// Incremental request head parser.
///
/// `LINE` bounds the request line and every header line the parser looks
/// at. Longer header lines are skipped up to their line break.
#[derive(Debug)]
pub struct HeadParser<const LINE: usize> {
    line: Vec<u8, LINE>,
    line_overflow: bool,
    consumed: usize,
    max_head: usize,
    head: Option<RequestHead>,
    complete: bool,
}

impl<const LINE: usize> HeadParser<LINE> {
    /// Parser rejecting heads longer than `max_head` bytes.
    pub const fn new(max_head: usize) -> Self {
        Self {
            line: Vec::new(),
            line_overflow: false,
            consumed: 0,
            max_head,
            head: None,
            complete: false,
        }
    }

    /// Consume the next chunk read from the connection.
    ///
    /// Returns `Some(n)` once the blank line closing the head has been seen:
    /// the first `n` bytes of `input` belong to the head and the rest is the
    /// start of the body. Returns `None` while more input is needed.
    pub fn feed(&mut self, input: &[u8]) -> Result<Option<usize>, HeadError> {
        if self.complete {
            return Ok(Some(0));
        }
        for (i, &byte) in input.iter().enumerate() {
            self.consumed += 1;
            if self.consumed > self.max_head {
                return Err(HeadError::TooLarge);
            }
            if byte != b'\n' {
                if self.line.push(byte).is_err() {
                    self.line_overflow = true;
                }
                continue;
            }
            if self.end_line()? {
                self.complete = true;
                return Ok(Some(i + 1));
            }
        }
        Ok(None)
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The parsed head, once [`feed`](Self::feed) reported completion.
    pub fn into_head(self) -> Option<RequestHead> {
        if self.complete { self.head } else { None }
    }

    /// Handle one finished line. Returns `true` for the blank line ending
    /// the head.
    fn end_line(&mut self) -> Result<bool, HeadError> {
        let overflow = core::mem::take(&mut self.line_overflow);
        let mut line = core::mem::take(&mut self.line);
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        let Some(head) = self.head.as_mut() else {
            if overflow {
                return Err(HeadError::UriTooLong);
            }
            // Empty lines before the request line are ignored.
            if !line.is_empty() {
                self.head = Some(parse_request_line(&line)?);
            }
            return Ok(false);
        };

        if overflow {
            return Ok(false);
        }
        if line.is_empty() {
            return Ok(true);
        }
        if let Some(length) = content_length(&line) {
            head.content_length = length;
        }
        Ok(false)
    }
}

fn parse_request_line(line: &[u8]) -> Result<RequestHead, HeadError> {
    let line = core::str::from_utf8(line).map_err(|_| HeadError::Malformed)?;
    let mut parts = line.split_whitespace();
    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(HeadError::Malformed);
    };
    if !version.starts_with("HTTP/") {
        return Err(HeadError::Malformed);
    }

    let raw_path = target.split_once('?').map_or(target, |(path, _)| path);
    let mut path = String::new();
    path.push_str(raw_path).map_err(|()| HeadError::UriTooLong)?;

    Ok(RequestHead {
        method: HttpMethod::parse(method),
        path,
        content_length: 0,
    })
}

/// Value of a `Content-Length` header line, any letter case.
fn content_length(line: &[u8]) -> Option<u32> {
    let line = core::str::from_utf8(line).ok()?;
    let (name, value) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(input: &[u8]) -> (RequestHead, usize) {
        let mut parser = HeadParser::<128>::new(4096);
        let head_len = parser.feed(input).unwrap().expect("head not complete");
        (parser.into_head().unwrap(), head_len)
    }

    #[test]
    fn parses_request_line_and_content_length() {
        let request = b"POST /api/pin-control HTTP/1.1\r\nHost: node\r\nContent-Length: 24\r\n\r\n{\"pin\":2,\"value\":\"HIGH\"}";
        let (head, head_len) = parse_all(request);

        assert_eq!(head.method, HttpMethod::Post);
        assert_eq!(head.path, "/api/pin-control");
        assert_eq!(head.content_length, 24);
        assert_eq!(&request[head_len..], br#"{"pin":2,"value":"HIGH"}"#);
    }

    #[test]
    fn multibyte_header_names_do_not_break_lookup() {
        let request = "GET / HTTP/1.1\r\nHost: x\r\nX-Custom-Heade\u{e9}r: v\r\nContent-Length: 5\r\n\r\n";
        let (head, _) = parse_all(request.as_bytes());
        assert_eq!(head.content_length, 5);
    }

    #[test]
    fn header_name_case_and_spacing_are_ignored() {
        let (head, _) = parse_all(b"POST /x HTTP/1.1\r\ncontent-LENGTH :  7 \r\n\r\n");
        assert_eq!(head.content_length, 7);
    }

    #[test]
    fn invalid_content_length_counts_as_absent() {
        let (head, _) = parse_all(b"POST /x HTTP/1.1\r\nContent-Length: many\r\n\r\n");
        assert_eq!(head.content_length, 0);
    }

    #[test]
    fn query_string_is_dropped_from_path() {
        let (head, _) = parse_all(b"GET /api/pins?t=1700000000 HTTP/1.1\r\n\r\n");
        assert_eq!(head.method, HttpMethod::Get);
        assert_eq!(head.path, "/api/pins");
    }

    #[test]
    fn accepts_bare_line_feeds_and_leading_blank_lines() {
        let request = b"\r\nDELETE /a HTTP/1.0\nContent-Length: 1\n\nx";
        let (head, head_len) = parse_all(request);
        assert_eq!(head.method, HttpMethod::Other);
        assert_eq!(head.path, "/a");
        assert_eq!(head.content_length, 1);
        assert_eq!(&request[head_len..], b"x");
    }

    #[test]
    fn byte_by_byte_input_gives_same_result() {
        let request = b"POST /api/pin-control HTTP/1.1\r\nContent-Length: 2\r\n\r\n{}";
        let mut parser = HeadParser::<64>::new(4096);
        let mut end = None;
        for (i, byte) in request.iter().enumerate() {
            if let Some(n) = parser.feed(core::slice::from_ref(byte)).unwrap() {
                end = Some(i + n);
                break;
            }
        }
        assert_eq!(end, Some(request.len() - 2));
        assert!(parser.is_complete());
        assert_eq!(parser.into_head().unwrap().content_length, 2);
    }

    #[test]
    fn skips_header_lines_longer_than_the_line_buffer() {
        let mut parser = HeadParser::<32>::new(4096);
        assert_eq!(parser.feed(b"POST /api/pin-control HTTP/1.1\r\n"), Ok(None));
        assert_eq!(parser.feed(b"Content-Length: 3\r\nCookie: "), Ok(None));
        for _ in 0..20 {
            assert_eq!(parser.feed(b"session=0123456789abcdef; "), Ok(None));
        }
        assert_eq!(parser.feed(b"\r\n\r\nabc"), Ok(Some(4)));

        let head = parser.into_head().unwrap();
        assert_eq!(head.path, "/api/pin-control");
        assert_eq!(head.content_length, 3);
    }

    #[test]
    fn rejects_bad_request_lines() {
        for input in [
            &b"GARBAGE\r\n\r\n"[..],
            b"GET /\r\n\r\n",
            b"GET / FTP/1.0\r\n\r\n",
            b"GET / HTTP/1.1 extra\r\n\r\n",
            b"GET /\xff HTTP/1.1\r\n\r\n",
        ] {
            let mut parser = HeadParser::<64>::new(4096);
            assert_eq!(parser.feed(input), Err(HeadError::Malformed));
        }
    }

    #[test]
    fn rejects_overlong_targets() {
        let mut parser = HeadParser::<32>::new(4096);
        assert_eq!(
            parser.feed(b"GET /aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa HTTP/1.1\r\n"),
            Err(HeadError::UriTooLong)
        );

        let mut long_path = [b'a'; MAX_PATH_LEN + 1];
        long_path[0] = b'/';
        let mut parser = HeadParser::<256>::new(4096);
        assert_eq!(parser.feed(b"GET "), Ok(None));
        assert_eq!(parser.feed(&long_path), Ok(None));
        assert_eq!(parser.feed(b" HTTP/1.1\r\n"), Err(HeadError::UriTooLong));
    }

    #[test]
    fn rejects_heads_without_terminator_within_limit() {
        let mut parser = HeadParser::<64>::new(64);
        assert_eq!(parser.feed(b"GET / HTTP/1.1\r\n"), Ok(None));
        assert_eq!(parser.feed(&[b'x'; 64]), Err(HeadError::TooLarge));
    }

    #[test]
    fn incomplete_head_has_no_result() {
        let mut parser = HeadParser::<64>::new(4096);
        assert_eq!(parser.feed(b"GET / HTTP/1.1\r\nHost: x\r\n"), Ok(None));
        assert!(!parser.is_complete());
        assert!(parser.into_head().is_none());
    }
}
