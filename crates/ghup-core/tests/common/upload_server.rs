//! Minimal HTTP/1.1 server that accepts release asset uploads for integration tests.
//!
//! Records every request (method, target, headers, body) and answers each one
//! with the next configured status, 201 Created once the list runs out.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Request target as sent, e.g. `/repos/o/r/releases/1/assets?name=a.txt`.
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct UploadServerOptions {
    /// Status for the n-th request; 201 when exhausted.
    pub statuses: Vec<u16>,
    /// Read the request but never answer (exercises client timeouts).
    pub stall: bool,
}

pub struct UploadServer {
    /// Base URL, e.g. "http://127.0.0.1:12345".
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl UploadServer {
    /// Upload endpoint in the shape GitHub returns it, template suffix included.
    pub fn templated_upload_url(&self) -> String {
        format!("{}/repos/o/r/releases/1/assets{{?name,label}}", self.base_url)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server that accepts every upload with 201.
pub fn start() -> UploadServer {
    start_with_options(UploadServerOptions::default())
}

/// Starts a server in a background thread. Runs until the process exits.
pub fn start_with_options(opts: UploadServerOptions) -> UploadServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    let mut statuses: VecDeque<u16> = opts.statuses.into_iter().collect();
    let stall = opts.stall;
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let status = statuses.pop_front().unwrap_or(201);
            let recorded = Arc::clone(&recorded);
            thread::spawn(move || handle(stream, status, stall, &recorded));
        }
    });
    UploadServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(stream: TcpStream, status: u16, stall: bool, recorded: &Mutex<Vec<RecordedRequest>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut reader = BufReader::new(match stream.try_clone() {
        Ok(s) => s,
        Err(_) => return,
    });
    let request = match read_request(&mut reader) {
        Some(r) => r,
        None => return,
    };
    recorded.lock().unwrap().push(request);

    if stall {
        thread::sleep(Duration::from_secs(30));
        return;
    }

    let body = if status == 201 {
        "{\"state\":\"uploaded\"}"
    } else {
        "{\"message\":\"rejected\"}"
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    let mut stream = stream;
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn read_request(reader: &mut BufReader<TcpStream>) -> Option<RecordedRequest> {
    let mut line = String::new();
    reader.read_line(&mut line).ok()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            return None;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let len = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).ok()?;

    Some(RecordedRequest {
        method,
        target,
        headers,
        body,
    })
}

fn reason(status: u16) -> &'static str {
    match status {
        201 => "Created",
        401 => "Unauthorized",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
