//! ServerChan push bindings for Rust
//! Sends a titled Markdown message to the WeChat account bound to a send key

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Public ServerChan Turbo endpoint
pub const DEFAULT_ENDPOINT: &str = "https://sctapi.ftqq.com";

#[derive(Error, Debug)]
pub enum PushError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Send key is empty")]
    EmptyKey,
    #[error("Push rejected (code {code}): {message}")]
    Rejected { code: i64, message: String },
}

#[derive(Debug, Serialize)]
struct SendPayload<'a> {
    title: &'a str,
    desp: &'a str,
}

/// Response body returned by `/{key}.send`
#[derive(Debug, Clone, Deserialize)]
pub struct SendResponse {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

pub struct PushClient {
    endpoint: String,
    key: String,
    client: Client,
}

impl PushClient {
    pub fn new(endpoint: &str, key: &str, timeout: Duration) -> Result<Self, PushError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(PushError::EmptyKey);
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            key: key.to_string(),
            client,
        })
    }

    /// URL the message is posted to
    pub fn send_url(&self) -> String {
        format!("{}/{}.send", self.endpoint, self.key)
    }

    /// Send a message. `desp` is rendered as Markdown by the provider.
    pub fn send(&self, title: &str, desp: &str) -> Result<SendResponse, PushError> {
        let payload = SendPayload { title, desp };

        let response = self
            .client
            .post(self.send_url())
            .form(&payload)
            .send()?
            .error_for_status()?;

        let body: SendResponse = response.json()?;
        check_response(body)
    }
}

/// A non-zero `code` means the provider refused the message
fn check_response(body: SendResponse) -> Result<SendResponse, PushError> {
    if body.code != 0 {
        return Err(PushError::Rejected {
            code: body.code,
            message: body.message,
        });
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Answer one request with `body` as JSON; the raw request comes back on the channel
    fn serve_once(body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];

            loop {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);

                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(split) = text.find("\r\n\r\n") {
                    let length = text[..split]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if request.len() >= split + 4 + length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            tx.send(String::from_utf8_lossy(&request).to_string()).unwrap();
        });

        (endpoint, rx)
    }

    #[test]
    fn test_send_url() {
        let client =
            PushClient::new("https://sctapi.ftqq.com/", "SCT123", Duration::from_secs(5)).unwrap();
        assert_eq!(client.send_url(), "https://sctapi.ftqq.com/SCT123.send");
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = PushClient::new(DEFAULT_ENDPOINT, "  ", Duration::from_secs(5));
        assert!(matches!(result, Err(PushError::EmptyKey)));
    }

    #[test]
    fn test_check_response() {
        let ok: SendResponse =
            serde_json::from_str(r#"{"code":0,"message":"","data":{"pushid":"1"}}"#).unwrap();
        assert!(check_response(ok).is_ok());

        let rejected: SendResponse =
            serde_json::from_str(r#"{"code":40001,"message":"bad pushkey"}"#).unwrap();
        match check_response(rejected) {
            Err(PushError::Rejected { code, message }) => {
                assert_eq!(code, 40001);
                assert_eq!(message, "bad pushkey");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_send_posts_form_to_key_path() {
        let (endpoint, requests) =
            serve_once(r#"{"code":0,"message":"","data":{"pushid":"42"}}"#);
        let client = PushClient::new(&endpoint, "SCT123", Duration::from_secs(5)).unwrap();

        let response = client
            .send("招聘公告更新（1）", "### 长沙市人社局\n\n最新公告：招聘")
            .unwrap();
        assert_eq!(response.code, 0);
        assert_eq!(response.data["pushid"], "42");

        let request = requests.recv().unwrap();
        assert!(request.starts_with("POST /SCT123.send HTTP/1.1\r\n"));
        assert!(request
            .to_lowercase()
            .contains("content-type: application/x-www-form-urlencoded"));

        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        // 招聘 is E6 8B 9B E8 81 98 in UTF-8; spaces are sent as '+'
        assert!(body.starts_with("title=%E6%8B%9B%E8%81%98"));
        assert!(body.contains("&desp=%23%23%23+"));
        assert!(body.contains("%0A%0A"));
    }

    #[test]
    fn test_send_rejected_code_is_error() {
        let (endpoint, requests) = serve_once(r#"{"code":40001,"message":"bad pushkey"}"#);
        let client = PushClient::new(&endpoint, "SCT123", Duration::from_secs(5)).unwrap();

        match client.send("title", "body") {
            Err(PushError::Rejected { code, message }) => {
                assert_eq!(code, 40001);
                assert_eq!(message, "bad pushkey");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(requests.recv().unwrap().starts_with("POST /SCT123.send"));
    }
}
