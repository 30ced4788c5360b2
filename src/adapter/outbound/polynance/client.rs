//! Polynance REST API client.
//!
//! Implements both [`OrderVenue`] and [`PriceVerifier`]:
//! - `POST /v1/orders/build` and `/v1/orders/execute` for the one-shot order
//! - `GET /v1/positions/{venue}/{address}` for position snapshots
//! - `GET /v1/oracle/pending` and `POST /v1/oracle/verify` for the keeper
//!
//! Errors carry the venue's own status and message; nothing is retried here.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use super::dto::{
    BuildOrderRequest, BuildOrderResponse, ExecuteOrderRequest, ExecuteOrderResponse,
    PendingPriceResponse, PositionsResponse, VerifyPriceRequest, VerifyPriceResponse,
};
use crate::domain::{
    OrderContext, OrderRequest, PendingOrderId, PositionSnapshot, SignedOrder, VenueId,
};
use crate::error::{Error, Result, SubmissionError, VerificationError};
use crate::infrastructure::config::venue::VenueConfig;
use crate::infrastructure::wallet::Wallet;
use crate::port::outbound::venue::{OrderVenue, PriceVerifier};

/// HTTP client for the Polynance API.
pub struct PolynanceClient {
    http: HttpClient,
    base_url: String,
    wallet: Arc<Wallet>,
    /// Pending ids observed by the most recent scan.
    pending: Mutex<Vec<PendingOrderId>>,
}

impl PolynanceClient {
    /// Create a client with default HTTP settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>, wallet: Arc<Wallet>) -> Self {
        Self::with_http(HttpClient::new(), base_url.into(), wallet)
    }

    #[must_use]
    pub fn from_config(config: &VenueConfig, wallet: Arc<Wallet>) -> Self {
        let http = HttpClient::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });
        Self::with_http(http, config.api_url.clone(), wallet)
    }

    fn with_http(http: HttpClient, base_url: String, wallet: Arc<Wallet>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            wallet,
            pending: Mutex::new(Vec::new()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn trader(&self) -> String {
        self.wallet.address().to_checksum(None)
    }

    async fn get_json<T>(&self, path: &str) -> std::result::Result<T, String>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(url = %url, "GET");
        let response = self.http.get(&url).send().await.map_err(|e| e.to_string())?;
        Self::read_json(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> std::result::Result<T, String>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(url = %url, "POST");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        Self::read_json(response).await
    }

    async fn read_json<T>(response: reqwest::Response) -> std::result::Result<T, String>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("{status}: {}", body.trim()));
        }
        response.json::<T>().await.map_err(|e| e.to_string())
    }
}

/// Canonical bytes signed for an order payload.
///
/// `serde_json::Value` objects serialize with sorted keys, so the same
/// payload always yields the same message.
fn signing_message(order: &serde_json::Value) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(order)?)
}

#[async_trait]
impl OrderVenue for PolynanceClient {
    async fn build_order(&self, request: &OrderRequest) -> Result<SignedOrder> {
        let body = BuildOrderRequest {
            provider: request.venue().as_str(),
            market_id_or_slug: request.market().as_str(),
            position_id_or_name: request.position().as_str(),
            buy_or_sell: request.side(),
            usdc_flow_abs: request.funding(),
            trader: self.trader(),
            client_order_id: Uuid::new_v4(),
        };

        let response: BuildOrderResponse = self
            .post_json("/v1/orders/build", &body)
            .await
            .map_err(SubmissionError::BuildFailed)?;

        let message = signing_message(&response.order)?;
        let signature = self
            .wallet
            .sign_message(&message)
            .await
            .map_err(|e| SubmissionError::BuildFailed(e.to_string()))?;

        Ok(SignedOrder::new(response.order, signature))
    }

    async fn execute_order(&self, order: SignedOrder) -> Result<OrderContext> {
        let (order, signature) = order.into_parts();
        let body = ExecuteOrderRequest { order, signature };

        let response: ExecuteOrderResponse = self
            .post_json("/v1/orders/execute", &body)
            .await
            .map_err(SubmissionError::ExecutionFailed)?;

        Ok(OrderContext {
            order_id: response.order_id,
            tx_hash: response.tx_hash,
            status: response.status,
            submitted_at: Utc::now(),
        })
    }

    async fn trader_positions(&self, venue: &VenueId, address: &str) -> Result<PositionSnapshot> {
        let path = format!("/v1/positions/{venue}/{address}");
        let response: PositionsResponse = self.get_json(&path).await.map_err(Error::Positions)?;

        Ok(PositionSnapshot {
            venue: venue.clone(),
            address: address.to_string(),
            positions: response.positions.into_iter().map(Into::into).collect(),
        })
    }

    fn venue_name(&self) -> &'static str {
        "Polynance"
    }
}

#[async_trait]
impl PriceVerifier for PolynanceClient {
    async fn scan_pending_price_data(&self) -> Result<bool> {
        let path = format!("/v1/oracle/pending?trader={}", self.trader());
        let response: PendingPriceResponse = self
            .get_json(&path)
            .await
            .map_err(VerificationError::ScanFailed)?;

        *self.pending.lock() = response
            .order_ids
            .into_iter()
            .map(PendingOrderId::new)
            .collect();
        Ok(response.ready)
    }

    async fn pending_order_ids(&self) -> Result<Vec<PendingOrderId>> {
        Ok(self.pending.lock().clone())
    }

    async fn verify_price(&self) -> Result<()> {
        let body = VerifyPriceRequest {
            trader: self.trader(),
        };
        let response: VerifyPriceResponse = self
            .post_json("/v1/oracle/verify", &body)
            .await
            .map_err(VerificationError::VerifyFailed)?;

        debug!(
            submitted = response.submitted,
            tx_hash = response.tx_hash.as_deref().unwrap_or("-"),
            "Verify response"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    use crate::domain::Side;

    const TEST_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    fn wallet() -> Arc<Wallet> {
        Arc::new(Wallet::offline(TEST_KEY, 137).unwrap())
    }

    fn client(base_url: &str) -> PolynanceClient {
        let http = HttpClient::builder().no_proxy().build().unwrap();
        PolynanceClient::with_http(http, base_url.to_string(), wallet())
    }

    fn order_request() -> OrderRequest {
        OrderRequest::new(
            "polymarket",
            "will-google-have-the-top-ai-model-on-may-31",
            "YES",
            Side::Buy,
            Decimal::TEN,
        )
        .unwrap()
    }

    #[derive(Debug, Clone)]
    struct Recorded {
        method: String,
        target: String,
        body: String,
    }

    impl Recorded {
        fn json(&self) -> Value {
            serde_json::from_str(&self.body).unwrap()
        }
    }

    /// Local HTTP server answering each connection with the next canned response.
    struct StubVenue {
        base_url: String,
        requests: Arc<Mutex<Vec<Recorded>>>,
    }

    impl StubVenue {
        async fn start(responses: Vec<(u16, &'static str)>) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let base_url = format!("http://{}", listener.local_addr().unwrap());
            let requests = Arc::new(Mutex::new(Vec::new()));
            let log = Arc::clone(&requests);

            tokio::spawn(async move {
                for (status, body) in responses {
                    let (mut stream, _) = listener.accept().await.unwrap();
                    let recorded = read_request(&mut stream).await;
                    log.lock().push(recorded);
                    let response = format!(
                        "HTTP/1.1 {status} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    stream.write_all(response.as_bytes()).await.unwrap();
                    stream.shutdown().await.ok();
                }
            });

            Self { base_url, requests }
        }

        fn requests(&self) -> Vec<Recorded> {
            self.requests.lock().clone()
        }
    }

    async fn read_request(stream: &mut TcpStream) -> Recorded {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
        let content_length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .map_or(0, |(_, value)| value.trim().parse::<usize>().unwrap());

        while buf.len() < header_end + content_length {
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before body");
            buf.extend_from_slice(&chunk[..n]);
        }

        let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
        Recorded {
            method: request_line.next().unwrap_or_default().to_string(),
            target: request_line.next().unwrap_or_default().to_string(),
            body: String::from_utf8_lossy(&buf[header_end..header_end + content_length])
                .into_owned(),
        }
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = client("https://api.example.com/");
        assert_eq!(
            client.url("/v1/oracle/verify"),
            "https://api.example.com/v1/oracle/verify"
        );
    }

    #[test]
    fn signing_message_is_key_order_independent() {
        let a = json!({"maker": "0x1", "amount": "10"});
        let b = json!({"amount": "10", "maker": "0x1"});
        assert_eq!(signing_message(&a).unwrap(), signing_message(&b).unwrap());
    }

    #[tokio::test]
    async fn pending_ids_empty_before_first_scan() {
        let client = client("https://api.example.com");
        assert!(client.pending_order_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn scan_caches_pending_ids_for_listing() {
        let stub =
            StubVenue::start(vec![(200, r#"{"ready":true,"orderIds":["o1","o2"]}"#)]).await;
        let client = client(&stub.base_url);

        assert!(client.scan_pending_price_data().await.unwrap());

        let ids = client.pending_order_ids().await.unwrap();
        assert_eq!(ids, vec![PendingOrderId::new("o1"), PendingOrderId::new("o2")]);
        let requests = stub.requests();
        assert_eq!(requests[0].method, "GET");
        assert_eq!(
            requests[0].target,
            format!("/v1/oracle/pending?trader={}", client.trader())
        );
    }

    #[tokio::test]
    async fn scan_not_ready_replaces_cached_ids() {
        let stub = StubVenue::start(vec![
            (200, r#"{"ready":true,"orderIds":["o1"]}"#),
            (200, r#"{"ready":false}"#),
        ])
        .await;
        let client = client(&stub.base_url);

        client.scan_pending_price_data().await.unwrap();
        assert!(!client.scan_pending_price_data().await.unwrap());

        assert!(client.pending_order_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn scan_error_status_carries_venue_message() {
        let stub = StubVenue::start(vec![(503, "oracle unavailable")]).await;
        let client = client(&stub.base_url);

        let err = client.scan_pending_price_data().await.unwrap_err();

        match err {
            Error::Verification(VerificationError::ScanFailed(msg)) => {
                assert!(msg.contains("503"), "{msg}");
                assert!(msg.contains("oracle unavailable"), "{msg}");
            }
            other => panic!("expected ScanFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_venue_is_a_scan_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let client = client(&base_url);

        let err = client.scan_pending_price_data().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Verification(VerificationError::ScanFailed(_))
        ));
    }

    #[tokio::test]
    async fn verify_posts_trader_without_order_ids() {
        let stub = StubVenue::start(vec![(200, r#"{"submitted":true,"txHash":"0xabc"}"#)]).await;
        let client = client(&stub.base_url);

        client.verify_price().await.unwrap();

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].target, "/v1/oracle/verify");
        assert_eq!(requests[0].json(), json!({ "trader": client.trader() }));
    }

    #[tokio::test]
    async fn verify_error_status_is_verify_failed() {
        let stub = StubVenue::start(vec![(500, r#"{"error":"dispute window closed"}"#)]).await;
        let client = client(&stub.base_url);

        let err = client.verify_price().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Verification(VerificationError::VerifyFailed(ref msg))
                if msg.contains("dispute window closed")
        ));
    }

    #[tokio::test]
    async fn build_signs_returned_order_and_execute_submits_it() {
        let stub = StubVenue::start(vec![
            (200, r#"{"order":{"maker":"0x1","amount":"10"}}"#),
            (200, r#"{"orderId":"abc","txHash":"0xtx","status":"matched"}"#),
        ])
        .await;
        let client = client(&stub.base_url);

        let signed = client.build_order(&order_request()).await.unwrap();
        let expected_signature = client
            .wallet
            .sign_message(&signing_message(signed.payload()).unwrap())
            .await
            .unwrap();
        assert_eq!(signed.signature(), expected_signature);

        let context = client.execute_order(signed).await.unwrap();
        assert_eq!(context.order_id, "abc");
        assert_eq!(context.tx_hash.as_deref(), Some("0xtx"));

        let requests = stub.requests();
        assert_eq!(requests[0].target, "/v1/orders/build");
        let build = requests[0].json();
        assert_eq!(build["provider"], "polymarket");
        assert_eq!(build["buyOrSell"], "BUY");
        assert_eq!(build["trader"], client.trader());

        assert_eq!(requests[1].target, "/v1/orders/execute");
        let execute = requests[1].json();
        assert_eq!(execute["order"], json!({"maker": "0x1", "amount": "10"}));
        assert_eq!(execute["signature"], expected_signature);
    }

    #[tokio::test]
    async fn build_error_status_is_build_failed() {
        let stub = StubVenue::start(vec![(400, r#"{"error":"market closed"}"#)]).await;
        let client = client(&stub.base_url);

        let err = client.build_order(&order_request()).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Submission(SubmissionError::BuildFailed(ref msg))
                if msg.contains("400") && msg.contains("market closed")
        ));
    }

    #[tokio::test]
    async fn execute_error_status_is_execution_failed() {
        let stub = StubVenue::start(vec![
            (200, r#"{"order":{"maker":"0x1"}}"#),
            (422, "signature rejected"),
        ])
        .await;
        let client = client(&stub.base_url);

        let signed = client.build_order(&order_request()).await.unwrap();
        let err = client.execute_order(signed).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Submission(SubmissionError::ExecutionFailed(ref msg))
                if msg.contains("signature rejected")
        ));
    }

    #[tokio::test]
    async fn positions_error_status_is_positions_error() {
        let stub = StubVenue::start(vec![(404, "unknown trader")]).await;
        let client = client(&stub.base_url);
        let venue = VenueId::new("polymarket");

        let err = client
            .trader_positions(&venue, "0x0000000000000000000000000000000000000001")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Positions(ref msg) if msg.contains("unknown trader")));
        assert_eq!(
            stub.requests()[0].target,
            "/v1/positions/polymarket/0x0000000000000000000000000000000000000001"
        );
    }
}
