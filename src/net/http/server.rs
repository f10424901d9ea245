use embassy_net::{Stack, tcp::TcpSocket};
use embassy_time::Duration;

use super::{HttpResult, connection::HttpConnection};

pub(crate) trait HttpHandler {
    async fn handle_request(&self, conn: HttpConnection<'_>) -> HttpResult;
}

/// Single-connection HTTP/1.1 server.
///
/// Connections are served one at a time and closed after the response.
pub(crate) struct HttpServer<'a, T: HttpHandler> {
    handler: &'a T,
}

impl<'a, T: HttpHandler> HttpServer<'a, T> {
    pub(crate) fn new(handler: &'a T) -> Self {
        Self { handler }
    }

    pub(crate) async fn listen_and_serve(
        &self,
        stack: Stack<'static>,
        port: u16,
        rx_buffer: &mut [u8],
        tx_buffer: &mut [u8],
    ) -> HttpResult {
        log::info!("http_server: listening on port {}", port);
        loop {
            let mut socket = TcpSocket::new(stack, rx_buffer, tx_buffer);
            socket.set_timeout(Some(Duration::from_secs(30)));

            if socket.accept(port).await.is_err() {
                continue;
            }

            let conn = match HttpConnection::from_socket(socket).await {
                Ok(connection) => connection,
                Err(e) => {
                    log::warn!("http_server: connection startup error: {}", e);
                    continue;
                }
            };

            if let Err(e) = self.handler.handle_request(conn).await {
                log::warn!("http_server: connection error: {}", e);
            }
        }
    }
}
