//! HTTP server adapter
//!
//! Allocates the socket buffers and runs the accept loop for a handler. Not
//! a task itself, it is awaited from `http_server_task`.

use embassy_net::Stack;

use crate::net::http::{HttpHandler, HttpServer};

const HTTP_PORT: u16 = 80;
const RX_BUFFER_SIZE: usize = 4096;
const TX_BUFFER_SIZE: usize = 4096;

/// Serve `handler` on port 80 forever.
///
/// Needs 8KB of task stack for the socket buffers.
pub(crate) async fn run_http_server<H: HttpHandler>(stack: Stack<'static>, handler: &H) {
    let server = HttpServer::new(handler);
    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TX_BUFFER_SIZE];

    if let Err(e) = server
        .listen_and_serve(stack, HTTP_PORT, &mut rx_buffer, &mut tx_buffer)
        .await
    {
        log::error!("http_server: stopped: {}", e);
    }
}
