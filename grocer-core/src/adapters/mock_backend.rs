//! Mock marketplace backend for testing
//!
//! A tiny HTTP server on a random local port that answers like the real
//! marketplace service:
//! - POST /api/v1/user/signin accepts password `password123` for any email
//!   and returns `{ token, user }`; the role follows the email prefix
//!   (`admin@` → ZEPTO_APP_ADMIN, `maint@` → MAINT, otherwise CONSUMER)
//! - GET /api/v1/product/search filters three canned products by `name`
//! - the remaining POST endpoints answer 200 with an empty body
//!
//! Authenticated endpoints require the `Authorization: valid-token` header.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::json;

pub const VALID_TOKEN: &str = "valid-token";
pub const VALID_PASSWORD: &str = "password123";

/// Scenario switches for the mock server
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Answer authenticated endpoints with this status and a text body
    pub fail_status: Option<u16>,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path including the query string
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// Mock marketplace server
pub struct MockBackend {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl MockBackend {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(Mutex::new(Vec::new()));

        // Non-blocking so the accept loop can notice shutdown
        listener.set_nonblocking(true)?;

        let running_clone = Arc::clone(&running);
        let requests_clone = Arc::clone(&requests);
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let log = Arc::clone(&requests_clone);
                        thread::spawn(move || handle_connection(stream, &cfg, &log));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.stop();
    }
}

fn read_request(stream: &TcpStream) -> Option<RecordedRequest> {
    stream.set_nonblocking(false).ok()?;
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut authorization = None;
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            match name.trim().to_ascii_lowercase().as_str() {
                "authorization" => authorization = Some(value.trim().to_string()),
                "content-length" => content_length = value.trim().parse().unwrap_or(0),
                _ => {}
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;

    Some(RecordedRequest {
        method,
        path,
        authorization,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, log: &Mutex<Vec<RecordedRequest>>) {
    let Some(request) = read_request(&stream) else {
        send_response(&mut stream, 400, "Bad Request", r#"{"message":"Invalid request"}"#);
        return;
    };
    if let Ok(mut entries) = log.lock() {
        entries.push(request.clone());
    }

    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    let route = request.path.split('?').next().unwrap_or("").to_string();

    // Public endpoints
    match (request.method.as_str(), route.as_str()) {
        ("POST", "/api/v1/user/signin") => {
            let (status, text, body) = sign_in(&request.body);
            send_response(&mut stream, status, text, &body);
            return;
        }
        ("POST", "/api/v1/user/signup") => {
            send_response(&mut stream, 201, "Created", "");
            return;
        }
        _ => {}
    }

    if request.authorization.as_deref() != Some(VALID_TOKEN) {
        send_response(&mut stream, 401, "Unauthorized", r#"{"message":"Token expired"}"#);
        return;
    }

    if let Some(status) = config.fail_status {
        send_response(&mut stream, status, "Error", "warehouse service unavailable");
        return;
    }

    match (request.method.as_str(), route.as_str()) {
        ("GET", "/api/v1/product/search") => {
            let term = query_param(&request.path, "name").map(|t| t.to_lowercase());
            let products: Vec<_> = canned_products()
                .into_iter()
                .filter(|p| match &term {
                    Some(t) => p["productName"]
                        .as_str()
                        .map(|n| n.to_lowercase().contains(t.as_str()))
                        .unwrap_or(false),
                    None => true,
                })
                .collect();
            send_response(&mut stream, 200, "OK", &serde_json::Value::from(products).to_string());
        }
        (
            "POST",
            "/product/register"
            | "/api/v1/warehouse/product/assign"
            | "/warehouse/create"
            | "/api/invite-admin"
            | "/api/v1/warehouse-admin/invite",
        ) => send_response(&mut stream, 200, "OK", ""),
        _ => send_response(&mut stream, 404, "Not Found", r#"{"message":"Endpoint not found"}"#),
    }
}

fn sign_in(body: &str) -> (u16, &'static str, String) {
    let parsed: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
    let email = parsed["email"].as_str().unwrap_or("");
    let password = parsed["password"].as_str().unwrap_or("");

    if password != VALID_PASSWORD {
        return (
            401,
            "Unauthorized",
            r#"{"message":"Invalid email or password"}"#.to_string(),
        );
    }

    let user_type = if email.starts_with("admin@") {
        "ZEPTO_APP_ADMIN"
    } else if email.starts_with("maint@") {
        "MAINT"
    } else {
        "CONSUMER"
    };
    let user_name = email.split('@').next().unwrap_or("user");

    let grant = json!({
        "token": VALID_TOKEN,
        "user": {
            "id": "5901634f-a4f5-4160-ade4-62321bc8c131",
            "userName": user_name,
            "email": email,
            "phoneNumber": 9876543210u64,
            "userType": user_type,
            "status": "ACTIVE"
        }
    });
    (200, "OK", grant.to_string())
}

fn query_param(path: &str, name: &str) -> Option<String> {
    let url = url::Url::parse(&format!("http://mock{}", path)).ok()?;
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

fn canned_products() -> Vec<serde_json::Value> {
    vec![
        json!({
            "productName": "Amul Taaza Milk",
            "manufacturerName": "Amul",
            "productImageLink": "https://cdn.example.com/amul-milk.png",
            "wid": "9b2f5d1c-0000-4000-8000-000000000001",
            "pid": "9b2f5d1c-0000-4000-8000-0000000000a1",
            "isAvailable": true,
            "basePrice": 28.0,
            "discount": 0,
            "totalQuantity": 40
        }),
        json!({
            "productName": "Mother Dairy Toned Milk",
            "manufacturerName": "Mother Dairy",
            "productImageLink": null,
            "wid": "9b2f5d1c-0000-4000-8000-000000000001",
            "pid": "9b2f5d1c-0000-4000-8000-0000000000a2",
            "isAvailable": false,
            "basePrice": 27.0,
            "discount": 5,
            "totalQuantity": 0
        }),
        json!({
            "productName": "India Gate Basmati Rice",
            "manufacturerName": "KRBL",
            "productImageLink": "",
            "wid": "9b2f5d1c-0000-4000-8000-000000000002",
            "pid": "9b2f5d1c-0000-4000-8000-0000000000b1",
            "isAvailable": true,
            "basePrice": 199.0,
            "discount": 12.5,
            "totalQuantity": 15
        }),
    ]
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let content_type = if body.starts_with('{') || body.starts_with('[') {
        "application/json"
    } else {
        "text/plain"
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        content_type,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
