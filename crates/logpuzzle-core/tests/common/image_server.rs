//! Minimal HTTP/1.1 server that serves fixed bodies by path for integration tests.
//!
//! Unknown paths get 404. Every response closes the connection, so bodies
//! sent without `Content-Length` are delimited by EOF.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct ImageServerOptions {
    /// If false, omit `Content-Length` (progress has no declared total).
    pub send_length: bool,
    /// Bytes of the body actually sent (None = all). The declared length stays the full size.
    pub send_only: Option<usize>,
    /// Pause after the first body bytes before sending the rest.
    pub stall: Option<Duration>,
}

impl Default for ImageServerOptions {
    fn default() -> Self {
        Self {
            send_length: true,
            send_only: None,
            stall: None,
        }
    }
}

/// Running server: base URL like "http://127.0.0.1:12345" (no trailing slash).
pub struct ImageServer {
    pub base: String,
    pub port: u16,
}

impl ImageServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Starts a server in a background thread serving `files` (path → body).
/// The server runs until the process exits.
pub fn start(files: Vec<(String, Vec<u8>)>) -> ImageServer {
    start_with_options(files, ImageServerOptions::default())
}

pub fn start_with_options(files: Vec<(String, Vec<u8>)>, opts: ImageServerOptions) -> ImageServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let files: Arc<HashMap<String, Vec<u8>>> = Arc::new(files.into_iter().collect());
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let files = Arc::clone(&files);
            thread::spawn(move || handle(stream, &files, opts));
        }
    });
    ImageServer {
        base: format!("http://127.0.0.1:{}", port),
        port,
    }
}

/// A port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().unwrap().port()
}

fn handle(mut stream: std::net::TcpStream, files: &HashMap<String, Vec<u8>>, opts: ImageServerOptions) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path) = parse_request_line(request);
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nConnection: close\r\nContent-Length: 0\r\n\r\n");
        return;
    }
    match files.get(path) {
        Some(body) => {
            let length = if opts.send_length {
                format!("Content-Length: {}\r\n", body.len())
            } else {
                String::new()
            };
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: image/jpeg\r\n{}Connection: close\r\n\r\n",
                length
            );
            let _ = stream.write_all(head.as_bytes());
            let body = &body[..opts.send_only.unwrap_or(body.len()).min(body.len())];
            match opts.stall {
                Some(pause) => {
                    let split = body.len().min(3);
                    let _ = stream.write_all(&body[..split]);
                    let _ = stream.flush();
                    thread::sleep(pause);
                    let _ = stream.write_all(&body[split..]);
                }
                None => {
                    let _ = stream.write_all(body);
                }
            }
        }
        None => {
            let body = b"not found";
            let head = format!(
                "HTTP/1.1 404 Not Found\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
        }
    }
    let _ = stream.flush();
}

/// Returns (method, path) from the request line.
fn parse_request_line(request: &str) -> (&str, &str) {
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/");
    (method, path)
}
