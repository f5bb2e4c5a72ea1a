//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a single static body for any GET path, except `/redirect`, which
//! answers `302` pointing at `/file.bin`. Options control whether
//! `Content-Length` is sent, whether the body is cut short, and the status.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct ServerOptions {
    /// If false, omit `Content-Length`; the body ends when the connection closes.
    pub send_content_length: bool,
    /// Close the connection after this many body bytes (Content-Length still declares the full size).
    pub truncate_at: Option<usize>,
    /// Status code for the file response; anything but 200 sends a short error body.
    pub status: u16,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            send_content_length: true,
            truncate_at: None,
            status: 200,
        }
    }
}

/// Starts a server in a background thread serving `body`. Returns the base URL
/// (e.g. "http://127.0.0.1:12345/"). The server runs until the process exits.
pub fn start(body: Vec<u8>) -> String {
    start_with_options(body, ServerOptions::default())
}

pub fn start_with_options(body: Vec<u8>, opts: ServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            thread::spawn(move || handle(stream, &body, opts));
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

/// A URL on a port nothing listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/file.bin", port)
}

fn handle(mut stream: TcpStream, body: &[u8], opts: ServerOptions) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    // Throttled clients read slowly; give writes plenty of room.
    let _ = stream.set_write_timeout(Some(Duration::from_secs(60)));
    let Some(path) = read_request_path(&mut stream) else {
        return;
    };

    if path == "/redirect" {
        let _ = stream.write_all(
            b"HTTP/1.1 302 Found\r\nLocation: /file.bin\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    }

    if opts.status != 200 {
        let msg = b"error";
        let head = format!(
            "HTTP/1.1 {} Error\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            opts.status,
            msg.len()
        );
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.write_all(msg);
        return;
    }

    let mut head = String::from("HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\n");
    if opts.send_content_length {
        head.push_str(&format!("Content-Length: {}\r\n", body.len()));
    }
    head.push_str("Connection: close\r\n\r\n");
    let _ = stream.write_all(head.as_bytes());

    let end = opts.truncate_at.unwrap_or(body.len()).min(body.len());
    let _ = stream.write_all(&body[..end]);
    let _ = stream.flush();
    let _ = stream.shutdown(std::net::Shutdown::Both);
}

/// Reads the request head and returns the request path.
fn read_request_path(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.len() > 64 * 1024 {
            return None;
        }
    }
    let request = String::from_utf8_lossy(&buf);
    let first = request.lines().next()?;
    let mut parts = first.split_whitespace();
    let method = parts.next()?;
    if !method.eq_ignore_ascii_case("GET") {
        return None;
    }
    parts.next().map(|p| p.to_string())
}
