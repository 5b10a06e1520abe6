//! Tiny HTTP/1.1 endpoint for driving the `ghup` binary end to end.
//!
//! Reads each request in full, counts it, and answers with the next scripted
//! status (201 Created once the script runs out).

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub struct StatusServer {
    /// Upload URL as a create-release step would emit it.
    pub upload_url: String,
    hits: Arc<AtomicUsize>,
}

impl StatusServer {
    /// Number of requests answered so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts the server in a background thread. Runs until the process exits.
pub fn start(statuses: &[u16]) -> StatusServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let mut script: VecDeque<u16> = statuses.iter().copied().collect();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let status = script.pop_front().unwrap_or(201);
            if answer(stream, status) {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }
    });
    StatusServer {
        upload_url: format!(
            "http://127.0.0.1:{}/repos/o/r/releases/1/assets{{?name,label}}",
            port
        ),
        hits,
    }
}

fn answer(stream: TcpStream, status: u16) -> bool {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut reader = match stream.try_clone() {
        Ok(s) => BufReader::new(s),
        Err(_) => return false,
    };
    let mut len = 0usize;
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => return false,
            Ok(_) => {}
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                len = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut body = vec![0u8; len];
    if reader.read_exact(&mut body).is_err() {
        return false;
    }

    let reason = match status {
        201 => "Created",
        422 => "Unprocessable Entity",
        _ => "Error",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{{}}",
        status, reason
    );
    let mut stream = stream;
    stream.write_all(response.as_bytes()).is_ok()
}
