#![allow(dead_code)]

pub mod test_server {
    use std::sync::Once;

    static MAY_INIT: Once = Once::new();

    /// Configure the may runtime once per test binary.
    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }
}

pub mod http {
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::time::Duration;

    /// Send one raw HTTP/1.1 request and return (status code, body).
    ///
    /// Reads until the Content-Length promised by the server has arrived so
    /// keep-alive connections don't hang the test.
    pub fn send_request(
        addr: SocketAddr,
        method: &str,
        target: &str,
        headers: &[(&str, &str)],
        body: Option<&str>,
    ) -> (u16, String) {
        let mut stream = TcpStream::connect(addr).expect("connect to test server");
        stream
            .set_read_timeout(Some(Duration::from_secs(2)))
            .expect("set read timeout");

        let mut request = format!("{} {} HTTP/1.1\r\nHost: {}\r\n", method, target, addr);
        for (name, value) in headers {
            request.push_str(&format!("{}: {}\r\n", name, value));
        }
        if let Some(body) = body {
            request.push_str(&format!("Content-Length: {}\r\n", body.len()));
        }
        request.push_str("Connection: close\r\n\r\n");
        if let Some(body) = body {
            request.push_str(body);
        }
        stream
            .write_all(request.as_bytes())
            .expect("write request");

        let mut raw = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    raw.extend_from_slice(&chunk[..n]);
                    if response_complete(&raw) {
                        break;
                    }
                }
                Err(_) => break,
            }
        }

        let raw = String::from_utf8_lossy(&raw).to_string();
        let status = raw
            .split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| panic!("no status line in response: '{raw}'"));
        let body = raw
            .split_once("\r\n\r\n")
            .map(|(_, b)| b.to_string())
            .unwrap_or_default();
        (status, body)
    }

    fn response_complete(raw: &[u8]) -> bool {
        let raw = String::from_utf8_lossy(raw);
        let Some((head, body)) = raw.split_once("\r\n\r\n") else {
            return false;
        };
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        body.len() >= content_length
    }
}
