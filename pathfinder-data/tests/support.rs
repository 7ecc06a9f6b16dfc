//! A one-shot HTTP server answering with a canned directions response.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// Server that answers exactly one request and reports its request line.
pub struct CannedServer {
    base_url: String,
    handle: JoinHandle<String>,
}

impl CannedServer {
    /// Start a server answering with `status` and a JSON `body`.
    pub fn start(status: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .unwrap_or_else(|err| panic!("failed to bind test listener: {err}"));
        let addr = listener
            .local_addr()
            .unwrap_or_else(|err| panic!("failed to read listener address: {err}"));
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener
                .accept()
                .unwrap_or_else(|err| panic!("failed to accept request: {err}"));
            let mut reader = BufReader::new(
                stream
                    .try_clone()
                    .unwrap_or_else(|err| panic!("failed to clone stream: {err}")),
            );
            let mut request_line = String::new();
            reader
                .read_line(&mut request_line)
                .unwrap_or_else(|err| panic!("failed to read request line: {err}"));
            let mut header = String::new();
            while reader.read_line(&mut header).is_ok_and(|read| read > 2) {
                header.clear();
            }
            stream
                .write_all(response.as_bytes())
                .unwrap_or_else(|err| panic!("failed to write response: {err}"));
            request_line.trim_end().to_owned()
        });
        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    /// Base URL of the server.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Wait for the request and return its request line.
    pub fn request_line(self) -> String {
        self.handle
            .join()
            .unwrap_or_else(|_| panic!("canned server thread panicked"))
    }
}

/// A base URL with nothing listening behind it.
pub fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .unwrap_or_else(|err| panic!("failed to bind test listener: {err}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|err| panic!("failed to read listener address: {err}"));
    drop(listener);
    format!("http://{addr}")
}
