//! Search suggestions for the address bar
//!
//! One request slot: every keystroke aborts the request in flight and
//! bumps a generation counter. A finished request delivers only if its
//! generation is still the newest, so a slow stale answer can never
//! overwrite a newer list or a newer hide.

use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

use crate::error::NavigationError;
use crate::Result;

pub const DEFAULT_SUGGEST_ENDPOINT: &str = "https://duckduckgo.com/ac/";

pub const SUGGEST_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// Replace the suggestion list with these phrases
    Ready(Vec<String>),
    /// Hide the suggestion list
    Hidden,
}

/// Receives outcomes, typically by forwarding them to the UI thread.
///
/// Called while the request slot is locked: it must not call back into
/// the fetcher.
pub type SuggestionSink = Arc<dyn Fn(SuggestionOutcome) + Send + Sync>;

pub struct SuggestionFetcher {
    endpoint: Url,
    client: RwLock<reqwest::Client>,
    sink: SuggestionSink,
    generation: Arc<AtomicU64>,
    slot: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl SuggestionFetcher {
    pub fn new(endpoint: &str, proxy: Option<&Url>, sink: SuggestionSink) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| NavigationError::InvalidUrl(format!("{endpoint}: {e}")))?;

        Ok(Self {
            endpoint,
            client: RwLock::new(build_client(proxy)?),
            sink,
            generation: Arc::new(AtomicU64::new(0)),
            slot: Arc::new(Mutex::new(None)),
        })
    }

    /// Route later requests through `proxy`, or directly when `None`
    pub fn set_proxy(&self, proxy: Option<&Url>) -> Result<()> {
        *self.client.write() = build_client(proxy)?;
        Ok(())
    }

    /// React to new address bar text.
    ///
    /// Blank text hides suggestions at once without touching the network.
    /// Otherwise a request is started on the current tokio runtime.
    pub fn update(&self, text: &str) {
        let mut slot = self.slot.lock();
        let generation = self.supersede(&mut slot);

        let query = text.trim();
        if query.is_empty() {
            (self.sink)(SuggestionOutcome::Hidden);
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime available for suggestion request");
            (self.sink)(SuggestionOutcome::Hidden);
            return;
        };

        let url = self.request_url(query);
        let client = self.client.read().clone();
        let sink = Arc::clone(&self.sink);
        let current = Arc::clone(&self.generation);
        let delivery_slot = Arc::clone(&self.slot);

        *slot = Some(runtime.spawn(async move {
            let outcome = match fetch_suggestions(&client, url).await {
                Ok(phrases) if !phrases.is_empty() => SuggestionOutcome::Ready(phrases),
                Ok(_) => SuggestionOutcome::Hidden,
                Err(e) => {
                    tracing::debug!(error = %e, "Suggestion request failed");
                    SuggestionOutcome::Hidden
                }
            };

            let _slot = delivery_slot.lock();
            if current.load(Ordering::SeqCst) == generation {
                sink(outcome);
            } else {
                tracing::trace!(generation, "Dropping stale suggestions");
            }
        }));
    }

    /// Abort any request in flight without delivering anything
    pub fn cancel(&self) {
        let mut slot = self.slot.lock();
        self.supersede(&mut slot);
    }

    pub fn request_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("q", query);
        url
    }

    fn supersede(&self, slot: &mut Option<JoinHandle<()>>) -> u64 {
        if let Some(handle) = slot.take() {
            handle.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

fn build_client(proxy: Option<&Url>) -> Result<reqwest::Client> {
    let builder = reqwest::Client::builder().timeout(SUGGEST_TIMEOUT);
    let builder = match proxy {
        Some(proxy) => builder.proxy(reqwest::Proxy::all(proxy.as_str())?),
        None => builder.no_proxy(),
    };
    Ok(builder.build()?)
}

async fn fetch_suggestions(client: &reqwest::Client, url: Url) -> Result<Vec<String>> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    parse_suggestions(&body).ok_or(NavigationError::MalformedPayload)
}

/// Extract phrases from `[{"phrase": "..."}, ...]`.
///
/// Returns `None` when the payload is not a JSON array. Entries without a
/// non-empty `phrase` string are skipped.
pub fn parse_suggestions(body: &[u8]) -> Option<Vec<String>> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let items = value.as_array()?;

    Some(
        items
            .iter()
            .filter_map(|item| item.get("phrase").and_then(Value::as_str))
            .filter(|phrase| !phrase.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tokio::sync::{mpsc, oneshot};

    fn channel_sink() -> (SuggestionSink, mpsc::UnboundedReceiver<SuggestionOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink: SuggestionSink = Arc::new(move |outcome| {
            let _ = tx.send(outcome);
        });
        (sink, rx)
    }

    /// Answer one HTTP request on a local port. The receiver yields the
    /// request line the client sent.
    async fn listen_once(body: &'static str) -> (SocketAddr, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]);
            let _ = tx.send(request.lines().next().unwrap_or_default().to_string());
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        (addr, rx)
    }

    async fn serve_once(body: &'static str) -> String {
        let (addr, _) = listen_once(body).await;
        format!("http://{addr}/ac/")
    }

    async fn next_outcome(rx: &mut mpsc::UnboundedReceiver<SuggestionOutcome>) -> SuggestionOutcome {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_parse_phrases() {
        let body = br#"[{"phrase": "rust"}, {"phrase": "rust lang"}, {"other": 1}, {"phrase": ""}, 5]"#;
        assert_eq!(
            parse_suggestions(body),
            Some(vec!["rust".to_string(), "rust lang".to_string()])
        );
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert_eq!(parse_suggestions(br#"{"phrase": "rust"}"#), None);
        assert_eq!(parse_suggestions(b"not json"), None);
        assert_eq!(parse_suggestions(b"[]"), Some(Vec::new()));
    }

    #[test]
    fn test_request_url_encodes_query() {
        let (sink, _rx) = channel_sink();
        let fetcher = SuggestionFetcher::new(DEFAULT_SUGGEST_ENDPOINT, None, sink).unwrap();

        assert_eq!(
            fetcher.request_url("rust & tokio").as_str(),
            "https://duckduckgo.com/ac/?q=rust+%26+tokio"
        );
    }

    #[test]
    fn test_blank_text_hides_without_request() {
        let (sink, mut rx) = channel_sink();
        let fetcher = SuggestionFetcher::new(DEFAULT_SUGGEST_ENDPOINT, None, sink).unwrap();

        fetcher.update("   ");
        assert_eq!(rx.try_recv().unwrap(), SuggestionOutcome::Hidden);
        assert!(fetcher.slot.lock().is_none());
    }

    #[tokio::test]
    async fn test_delivers_phrases() {
        let endpoint = serve_once(r#"[{"phrase": "rust"}, {"phrase": "rust book"}]"#).await;
        let (sink, mut rx) = channel_sink();
        let fetcher = SuggestionFetcher::new(&endpoint, None, sink).unwrap();

        fetcher.update("rus");
        let outcome = next_outcome(&mut rx).await;
        assert_eq!(
            outcome,
            SuggestionOutcome::Ready(vec!["rust".to_string(), "rust book".to_string()])
        );
    }

    #[tokio::test]
    async fn test_empty_payload_hides() {
        let endpoint = serve_once("[]").await;
        let (sink, mut rx) = channel_sink();
        let fetcher = SuggestionFetcher::new(&endpoint, None, sink).unwrap();

        fetcher.update("zzzz");
        let outcome = next_outcome(&mut rx).await;
        assert_eq!(outcome, SuggestionOutcome::Hidden);
    }

    #[tokio::test]
    async fn test_connection_failure_hides() {
        // Bind then drop to get a port nothing listens on
        let addr = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap()
            .local_addr()
            .unwrap();
        let (sink, mut rx) = channel_sink();
        let fetcher = SuggestionFetcher::new(&format!("http://{addr}/ac/"), None, sink).unwrap();

        fetcher.update("rust");
        let outcome = next_outcome(&mut rx).await;
        assert_eq!(outcome, SuggestionOutcome::Hidden);
    }

    #[tokio::test]
    async fn test_newer_input_supersedes_request_in_flight() {
        let endpoint = serve_once(r#"[{"phrase": "stale"}]"#).await;
        let (sink, mut rx) = channel_sink();
        let fetcher = SuggestionFetcher::new(&endpoint, None, sink).unwrap();

        fetcher.update("sta");
        fetcher.update("");

        assert_eq!(rx.recv().await.unwrap(), SuggestionOutcome::Hidden);
        let late = tokio::time::timeout(Duration::from_millis(500), rx.recv()).await;
        assert!(late.is_err(), "stale suggestions were delivered");
    }

    #[tokio::test]
    async fn test_cancel_drops_request_in_flight() {
        let endpoint = serve_once(r#"[{"phrase": "too late"}]"#).await;
        let (sink, mut rx) = channel_sink();
        let fetcher = SuggestionFetcher::new(&endpoint, None, sink).unwrap();

        fetcher.update("too");
        fetcher.cancel();

        assert!(fetcher.slot.lock().is_none());
        let late = tokio::time::timeout(Duration::from_millis(500), rx.recv()).await;
        assert!(late.is_err(), "cancelled request delivered {late:?}");
    }

    #[tokio::test]
    async fn test_requests_go_through_configured_proxy() {
        let (proxy_addr, request_line) = listen_once(r#"[{"phrase": "via proxy"}]"#).await;
        let proxy = Url::parse(&format!("http://{proxy_addr}")).unwrap();
        let (sink, mut rx) = channel_sink();
        // The target host never resolves, only the proxy can answer
        let fetcher = SuggestionFetcher::new("http://suggest.invalid/ac/", None, sink).unwrap();

        fetcher.set_proxy(Some(&proxy)).unwrap();
        fetcher.update("rust");

        assert_eq!(
            next_outcome(&mut rx).await,
            SuggestionOutcome::Ready(vec!["via proxy".to_string()])
        );
        let line = request_line.await.unwrap();
        assert!(
            line.starts_with("GET http://suggest.invalid/ac/?q=rust"),
            "unexpected request line: {line}"
        );
    }

    #[tokio::test]
    async fn test_clearing_proxy_goes_direct() {
        let dead = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap()
            .local_addr()
            .unwrap();
        let dead_proxy = Url::parse(&format!("http://{dead}")).unwrap();
        let endpoint = serve_once(r#"[{"phrase": "direct"}]"#).await;
        let (sink, mut rx) = channel_sink();
        let fetcher = SuggestionFetcher::new(&endpoint, Some(&dead_proxy), sink).unwrap();

        fetcher.set_proxy(None).unwrap();
        fetcher.update("dir");

        assert_eq!(
            next_outcome(&mut rx).await,
            SuggestionOutcome::Ready(vec!["direct".to_string()])
        );
    }
}
