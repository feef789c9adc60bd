//! Binance C2C REST client.
//!
//! Fetches the account's P2P order history one side at a time, following
//! pagination until the API runs out of rows.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::form_urlencoded;

use super::dto::HistoryResponse;
use super::signer::Signer;
use crate::domain::{TimeWindow, TradeRecord, TradeSide};
use crate::error::{Result, SourceError};
use crate::port::TradeHistorySource;

/// Path of the signed order-history endpoint.
pub const HISTORY_PATH: &str = "/sapi/v1/c2c/orderMatch/listUserOrderHistory";

/// Connection settings for the Binance C2C API.
#[derive(Clone)]
pub struct BinanceSettings {
    /// Base URL, e.g. `https://api.binance.com`.
    pub api_url: String,
    pub api_key: String,
    pub secret_key: String,
    /// `recvWindow` sent with every signed request.
    pub recv_window_ms: u64,
    /// Rows requested per page (the API caps this at 100).
    pub page_size: u32,
    /// Safety cap on pages fetched for one query.
    pub max_pages: u32,
}

impl std::fmt::Debug for BinanceSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceSettings")
            .field("api_url", &self.api_url)
            .field("recv_window_ms", &self.recv_window_ms)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .finish_non_exhaustive()
    }
}

/// HTTP client for the Binance C2C trade-history API.
pub struct BinanceC2cClient {
    client: Client,
    settings: BinanceSettings,
    signer: Signer,
}

impl BinanceC2cClient {
    #[must_use]
    pub fn new(settings: BinanceSettings) -> Self {
        let signer = Signer::new(settings.secret_key.clone());
        Self {
            client: Client::new(),
            settings,
            signer,
        }
    }

    /// Build the signed query string for one page.
    fn signed_query(
        &self,
        side: &TradeSide,
        window: Option<TimeWindow>,
        page: u32,
        timestamp_ms: i64,
    ) -> Result<String> {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("tradeType", side.as_str());
        if let Some(window) = window {
            query.append_pair("startTimestamp", &window.start_ms.to_string());
            query.append_pair("endTimestamp", &window.end_ms.to_string());
        }
        query.append_pair("page", &page.to_string());
        query.append_pair("rows", &self.settings.page_size.to_string());
        query.append_pair("recvWindow", &self.settings.recv_window_ms.to_string());
        query.append_pair("timestamp", &timestamp_ms.to_string());
        let query = query.finish();

        let signature = self.signer.sign(&query)?;
        Ok(format!("{query}&signature={signature}"))
    }

    async fn fetch_page(
        &self,
        side: &TradeSide,
        window: Option<TimeWindow>,
        page: u32,
    ) -> Result<HistoryResponse> {
        let query = self.signed_query(side, window, page, chrono::Utc::now().timestamp_millis())?;
        let url = format!(
            "{}{}?{}",
            self.settings.api_url.trim_end_matches('/'),
            HISTORY_PATH,
            query
        );

        let response = self
            .client
            .get(&url)
            .header("X-MBX-APIKEY", &self.settings.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Rejected {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body: HistoryResponse = response.json().await?;
        if !body.success {
            return Err(SourceError::Api {
                code: body.code.unwrap_or_default(),
                message: body.message.unwrap_or_default(),
            }
            .into());
        }

        Ok(body)
    }
}

#[async_trait]
impl TradeHistorySource for BinanceC2cClient {
    async fn query(
        &self,
        side: &TradeSide,
        window: Option<TimeWindow>,
    ) -> Result<Vec<TradeRecord>> {
        let mut records = Vec::new();
        let page_size = self.settings.page_size as usize;

        for page in 1..=self.settings.max_pages.max(1) {
            let body = self.fetch_page(side, window, page).await?;
            let batch = body.data.unwrap_or_default();
            let batch_len = batch.len();
            records.extend(batch);

            debug!(side = %side, page, rows = batch_len, "Fetched history page");

            let exhausted = batch_len < page_size
                || body
                    .total
                    .is_some_and(|total| records.len() as u64 >= total);
            if exhausted {
                return Ok(records);
            }

            if page == self.settings.max_pages {
                warn!(
                    side = %side,
                    pages = page,
                    rows = records.len(),
                    "Page limit reached, history truncated"
                );
            }
        }

        Ok(records)
    }

    fn name(&self) -> &'static str {
        "binance-c2c"
    }
}
