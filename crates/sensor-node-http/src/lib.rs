//! HTTP/1.1 request head parsing for the sensor node web server
//!
//! The firmware reads a request from a TCP socket in small chunks. A
//! [`HeadParser`] consumes those chunks as they arrive and keeps only what
//! the server routes on: method, path and `Content-Length`. Header lines
//! that do not fit its line buffer are skipped, so a long browser head
//! costs no more memory than a short one.

#![no_std]

mod head;

pub use head::{HeadError, HeadParser, HttpMethod, MAX_PATH_LEN, RequestHead};
