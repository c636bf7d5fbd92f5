use std::error::Error as StdError;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use status_fetch_core::config::FetcherConfig;
use status_fetch_core::error::ProcessingError;

/// Outbound GET requests issued by the status pipeline.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, ProcessingError>;

    /// Returns the response body untouched, without charset decoding.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ProcessingError>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for &T {
    async fn fetch_text(&self, url: &str) -> Result<String, ProcessingError> {
        (**self).fetch_text(url).await
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ProcessingError> {
        (**self).fetch_bytes(url).await
    }
}

#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, ProcessingError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.http_timeout)
            .redirect(Policy::limited(10))
            .build()
            .map_err(|error| {
                ProcessingError::Configuration(format!("failed to build http client: {error}"))
            })?;
        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<Response, ProcessingError> {
        self.client
            .get(url)
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|error| ProcessingError::fetch(error_chain(&error)))
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, ProcessingError> {
        self.get(url)
            .await?
            .text()
            .await
            .map_err(|error| ProcessingError::fetch(error_chain(&error)))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ProcessingError> {
        self.get(url)
            .await?
            .bytes()
            .await
            .map(|body| body.to_vec())
            .map_err(|error| ProcessingError::fetch(error_chain(&error)))
    }
}

/// Renders an error followed by each of its causes, joined with `": "`.
///
/// reqwest's own `Display` omits the transport cause (refused connection,
/// timeout, DNS failure), which is the part callers need to see.
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serves one canned HTTP/1.1 response and returns the base URL.
    async fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let address = listener.local_addr().expect("listener address");

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept connection");
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            let head = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket
                .write_all(head.as_bytes())
                .await
                .expect("write response head");
            socket.write_all(body).await.expect("write response body");
            let _ = socket.shutdown().await;
        });

        format!("http://{address}/")
    }

    fn fetcher() -> HttpPageFetcher {
        HttpPageFetcher::new(&FetcherConfig::default()).expect("client should build")
    }

    #[derive(Debug)]
    struct Layer {
        text: &'static str,
        cause: Option<Box<Layer>>,
    }

    impl std::fmt::Display for Layer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.text)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.cause.as_deref().map(|cause| cause as &(dyn StdError + 'static))
        }
    }

    #[test]
    fn error_chain_appends_every_cause() {
        let error = Layer {
            text: "error sending request",
            cause: Some(Box::new(Layer {
                text: "client error (Connect)",
                cause: Some(Box::new(Layer {
                    text: "ETIMEDOUT",
                    cause: None,
                })),
            })),
        };

        assert_eq!(
            error_chain(&error),
            "error sending request: client error (Connect): ETIMEDOUT"
        );
    }

    #[tokio::test]
    async fn refused_connection_keeps_its_cause() {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let address = listener.local_addr().expect("listener address");
        drop(listener);

        let error = fetcher()
            .fetch_text(&format!("http://{address}/"))
            .await
            .expect_err("closed port should fail");
        assert_eq!(error.kind(), "fetch_failed");
        assert!(
            error.message().to_lowercase().contains("connection refused"),
            "unexpected message: {}",
            error.message()
        );
    }

    #[tokio::test]
    async fn timeout_keeps_its_cause() {
        // Accepted by the kernel backlog but never answered.
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let address = listener.local_addr().expect("listener address");
        let config = FetcherConfig {
            http_timeout: std::time::Duration::from_millis(300),
            ..FetcherConfig::default()
        };

        let error = HttpPageFetcher::new(&config)
            .expect("client should build")
            .fetch_bytes(&format!("http://{address}/"))
            .await
            .expect_err("silent upstream should time out");
        assert_eq!(error.kind(), "fetch_failed");
        assert!(
            error.message().contains("timed out"),
            "unexpected message: {}",
            error.message()
        );
        drop(listener);
    }

    #[tokio::test]
    async fn returns_body_bytes_verbatim() {
        let body: &'static [u8] = &[0x50, 0x4b, 0x03, 0x04, 0xff, 0x00, 0x9c];
        let url = serve_once("200 OK", body).await;

        let bytes = fetcher().fetch_bytes(&url).await.expect("fetch succeeds");
        assert_eq!(bytes, body);
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        let url = serve_once("404 Not Found", b"missing").await;

        let error = fetcher()
            .fetch_text(&url)
            .await
            .expect_err("404 should fail");
        assert_eq!(error.kind(), "fetch_failed");
        assert!(error.message().contains("404 Not Found"));
    }

    #[tokio::test]
    async fn relative_url_is_a_fetch_error() {
        let error = fetcher()
            .fetch_bytes("undefined")
            .await
            .expect_err("invalid url should fail");
        assert_eq!(error.kind(), "fetch_failed");
    }
}
