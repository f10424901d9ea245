use embassy_net::tcp::TcpSocket;
use embedded_io_async::Write as _;
use heapless::{String, Vec};
use sensor_node_http::{HeadParser, HttpMethod, MAX_PATH_LEN};
use serde::{Serialize, de::DeserializeOwned};

use super::{
    Error,
    HttpResult,
    headers::{
        ContentHeaders,
        ContentType,
        ResponseHeaders,
        Status,
        TargetWriter as _,
        TextEncoding,
    },
};

/// Longest request or header line inspected, longer header lines are skipped.
const HEAD_LINE_SIZE: usize = 256;
const MAX_HEAD_SIZE: usize = 8 * 1024;
const HEADER_BUFFER_SIZE: usize = 512;
const BODY_BUFFER_SIZE: usize = 2048;
const RX_CHUNK_SIZE: usize = 256;
const STREAM_CHUNK_SIZE: usize = 1024;

/// HTTP connection context
pub(crate) struct HttpConnection<'a> {
    pub method: HttpMethod,
    pub path: String<MAX_PATH_LEN>,

    socket: TcpSocket<'a>,
    content_length: u32,
    header_buf: Vec<u8, HEADER_BUFFER_SIZE>,
    body_buf: Vec<u8, BODY_BUFFER_SIZE>,
}

impl<'a> HttpConnection<'a> {
    /// Read the request head from a freshly accepted socket.
    ///
    /// A head the parser rejects is answered with its status before the
    /// error is returned.
    pub(crate) async fn from_socket(mut socket: TcpSocket<'a>) -> Result<Self, Error> {
        let mut parser = HeadParser::<HEAD_LINE_SIZE>::new(MAX_HEAD_SIZE);
        let mut body_buf = Vec::<u8, BODY_BUFFER_SIZE>::new();
        let mut chunk = [0u8; RX_CHUNK_SIZE];

        while !parser.is_complete() {
            let n = socket.read(&mut chunk).await?;
            if n == 0 {
                return Err(Error::Closed);
            }
            match parser.feed(&chunk[..n]) {
                Ok(None) => {}
                // Bytes after the head are the start of the body.
                Ok(Some(head_len)) => body_buf
                    .extend_from_slice(&chunk[head_len..n])
                    .map_err(|()| Error::Parse)?,
                Err(e) => {
                    log::warn!("http: rejected request: {}", e);
                    reject(&mut socket, Status::from(e)).await;
                    return Err(Error::Parse);
                }
            }
        }
        let head = parser.into_head().ok_or(Error::Parse)?;

        Ok(Self {
            method: head.method,
            path: head.path,
            socket,
            content_length: head.content_length,
            header_buf: Vec::new(),
            body_buf,
        })
    }

    /// Get request method and path
    pub(crate) fn route(&self) -> (HttpMethod, &'_ str) {
        (self.method, self.path.as_str())
    }

    /// Write the headers to the connection
    pub(crate) async fn write_headers(&mut self, headers: &ResponseHeaders) -> HttpResult {
        self.header_buf.clear();
        headers.write_to(&mut self.header_buf)?;
        self.socket.write_all(self.header_buf.as_slice()).await?;
        self.socket.flush().await?;
        Ok(())
    }

    /// Answer with a bodyless status.
    pub(crate) async fn respond(&mut self, status: Status) -> HttpResult {
        self.write_headers(&ResponseHeaders::new(status)).await
    }

    /// Write the body to the connection
    pub(crate) async fn write_body(&mut self, body: &[u8]) -> HttpResult {
        for chunk in body.chunks(STREAM_CHUNK_SIZE) {
            self.socket.write_all(chunk).await?;
        }
        self.socket.flush().await?;
        Ok(())
    }

    /// Write a complete HTML document.
    pub(crate) async fn write_html(&mut self, html: &str) -> HttpResult {
        let headers = ResponseHeaders::success().with_content(
            ContentHeaders::new(ContentType::TextHtml)
                .with_text_encoding(TextEncoding::Utf8)
                .with_length(html.len()),
        );
        self.write_headers(&headers).await?;
        self.write_body(html.as_bytes()).await
    }

    /// Write JSON to the connection
    ///
    /// Writes both headers and body. Fails with [`Error::Serialize`] before
    /// anything is sent when the value does not fit the body buffer.
    pub(crate) async fn write_json<T: Serialize>(&mut self, data: &T) -> HttpResult {
        self.body_buf.clear();
        self.body_buf
            .resize_default(BODY_BUFFER_SIZE)
            .map_err(|()| Error::Serialize)?;
        let n = serde_json_core::to_slice(data, self.body_buf.as_mut_slice())
            .map_err(|_| Error::Serialize)?;
        self.body_buf.truncate(n);

        let headers = ResponseHeaders::success().with_content(
            ContentHeaders::new(ContentType::Json)
                .with_text_encoding(TextEncoding::Utf8)
                .with_length(n),
        );
        self.write_headers(&headers).await?;
        self.socket.write_all(self.body_buf.as_slice()).await?;
        self.socket.flush().await?;
        Ok(())
    }

    /// Read JSON from the request body
    pub(crate) async fn read_json<T: DeserializeOwned>(&mut self) -> Result<T, Error> {
        let body = self.read_body().await?;
        let (data, _) = serde_json_core::from_slice(body).map_err(|e| {
            log::debug!("http: body parse error: {:?}", e);
            Error::Parse
        })?;
        Ok(data)
    }

    /// Read the request body
    ///
    /// `body_buf` already holds whatever arrived together with the head.
    async fn read_body(&mut self) -> Result<&[u8], Error> {
        if self.content_length == 0 {
            return Err(Error::NoData);
        }
        let content_length = self.content_length as usize;
        if content_length > BODY_BUFFER_SIZE {
            return Err(Error::Parse);
        }

        while self.body_buf.len() < content_length {
            let mut buf = [0u8; RX_CHUNK_SIZE];
            let n = self.socket.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            let take = n.min(content_length - self.body_buf.len());
            self.body_buf
                .extend_from_slice(&buf[..take])
                .map_err(|()| Error::Parse)?;
        }

        let len = self.body_buf.len().min(content_length);
        Ok(&self.body_buf[..len])
    }
}

/// Best-effort status line for a request that never became a connection.
async fn reject(socket: &mut TcpSocket<'_>, status: Status) {
    let mut buf = Vec::<u8, 160>::new();
    if ResponseHeaders::new(status).write_to(&mut buf).is_ok() {
        let _ = socket.write_all(&buf).await;
        let _ = socket.flush().await;
    }
}
