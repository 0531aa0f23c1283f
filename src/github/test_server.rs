// src/github/test_server.rs
// =============================================================================
// A one-shot HTTP server for tests.
//
// It binds to a random local port, accepts exactly one connection, records
// the raw request head and answers with a canned status line and JSON body.
// That is enough to exercise the client against real HTTP without touching
// the network.
// =============================================================================

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub struct CannedServer {
    /// Base URL to hand to the client, e.g. "http://127.0.0.1:41234"
    pub url: String,
    request: JoinHandle<String>,
}

impl CannedServer {
    // Parameters:
    //   status: status line after "HTTP/1.1 ", e.g. "200 OK"
    //   body: response body sent as application/json
    pub async fn start(status: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        let request = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // GET requests have no body, so the head ends the request
            let mut head = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&chunk[..n]);
                if head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&head).into_owned()
        });

        Self { url, request }
    }

    /// The request the server received. Header names are lowercased by the
    /// HTTP stack, so callers match on lowercase names.
    pub async fn request(self) -> String {
        self.request.await.unwrap()
    }
}
