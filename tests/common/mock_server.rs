//! Minimal blocking HTTP server standing in for the logging endpoint

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ReceivedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ReceivedRequest {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

pub struct MockServer {
    pub addr: SocketAddr,
    requests: Receiver<ReceivedRequest>,
}

#[allow(dead_code)]
impl MockServer {
    /// Start a mock server answering 200 on a random port
    pub fn start() -> Self {
        Self::start_with_status(200)
    }

    /// Start a mock server answering every request with `status`
    pub fn start_with_status(status: u16) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let (tx, rx) = unbounded();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let tx = tx.clone();
                thread::spawn(move || {
                    let _ = handle_connection(stream, status, &tx);
                });
            }
        });

        MockServer { addr, requests: rx }
    }

    /// URL of the log endpoint on this server
    pub fn endpoint(&self) -> String {
        format!("http://{}/api/v1/log", self.addr)
    }

    /// Wait for the next captured request
    pub fn next_request(&self, timeout: Duration) -> Option<ReceivedRequest> {
        self.requests.recv_timeout(timeout).ok()
    }

    /// Collect exactly `count` requests, panicking if they do not arrive
    pub fn expect_requests(&self, count: usize, timeout: Duration) -> Vec<ReceivedRequest> {
        (0..count)
            .map(|i| {
                self.next_request(timeout)
                    .unwrap_or_else(|| panic!("request {} of {} never arrived", i + 1, count))
            })
            .collect()
    }
}

fn handle_connection(
    stream: TcpStream,
    status: u16,
    requests: &Sender<ReceivedRequest>,
) -> io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; content_length];
    reader.read_exact(&mut body)?;

    let _ = requests.send(ReceivedRequest {
        method,
        path,
        headers,
        body,
    });

    let response_body = r#"{"ok":true}"#;
    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        response_body.len(),
        response_body
    )?;
    stream.flush()
}
