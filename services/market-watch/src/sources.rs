//! Upstream data sources
//!
//! Two read-only HTTP sources feed the pipeline: the reference venue's
//! contract catalog (consumed once at startup) and the paginated ranked
//! snapshot endpoint (polled each cycle). Both sit behind traits so the
//! pipeline runs unchanged against in-memory doubles in tests.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use types::contract::ContractSpec;
use types::listing::{Listing, ListingId};

/// Errors from an upstream source request.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("response decode error: {0}")]
    Decode(String),
}

/// Reference-venue contract catalog.
#[async_trait]
pub trait ContractCatalog {
    async fn fetch_contracts(&self) -> Result<Vec<ContractSpec>, SourceError>;
}

/// Paginated ranked-listing snapshot source.
#[async_trait]
pub trait SnapshotSource {
    /// Fetch one snapshot page (1-based), preserving the page's
    /// internal order.
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<Listing>, SourceError>;
}

// ── Wire formats ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ExchangeInfoResponse {
    symbols: Vec<ContractRecord>,
}

#[derive(Debug, Deserialize)]
struct ContractRecord {
    #[serde(rename = "contractType", default)]
    contract_type: String,
    #[serde(rename = "quoteAsset", default)]
    quote_asset: String,
    #[serde(rename = "baseAsset", default)]
    base_asset: String,
    #[serde(default)]
    symbol: String,
}

impl From<ContractRecord> for ContractSpec {
    fn from(record: ContractRecord) -> Self {
        ContractSpec {
            contract_type: record.contract_type,
            quote_asset: record.quote_asset,
            base_asset: record.base_asset,
            symbol: record.symbol,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MarketRecord {
    id: String,
    symbol: String,
    name: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    market_cap_rank: Option<u32>,
    #[serde(default)]
    current_price: Option<f64>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    total_volume: Option<f64>,
    #[serde(default)]
    market_cap: Option<f64>,
}

impl From<MarketRecord> for Listing {
    fn from(record: MarketRecord) -> Self {
        Listing {
            id: ListingId::new(record.id),
            symbol: record.symbol,
            display_name: record.name,
            image_ref: record.image,
            rank: record.market_cap_rank,
            price: record.current_price,
            change_24h_pct: record.price_change_percentage_24h,
            volume_24h: record.total_volume,
            market_cap: record.market_cap,
            alias: None,
        }
    }
}

// ── HTTP implementations ────────────────────────────────────────────

async fn get_json<T: serde::de::DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, SourceError> {
    let response = client.get(url).query(query).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| SourceError::Decode(e.to_string()))
}

/// Contract catalog backed by the venue's exchange-info endpoint.
pub struct HttpContractCatalog {
    client: Client,
    url: String,
}

impl HttpContractCatalog {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl ContractCatalog for HttpContractCatalog {
    async fn fetch_contracts(&self) -> Result<Vec<ContractSpec>, SourceError> {
        let info: ExchangeInfoResponse = get_json(&self.client, &self.url, &[]).await?;
        debug!(contracts = info.symbols.len(), "contract catalog fetched");
        Ok(info.symbols.into_iter().map(ContractSpec::from).collect())
    }
}

/// Snapshot source backed by a ranked-markets endpoint, ordered by
/// market cap descending, parameterized by page and page size.
pub struct HttpSnapshotSource {
    client: Client,
    url: String,
}

impl HttpSnapshotSource {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<Listing>, SourceError> {
        let query = [
            ("vs_currency", "usd".to_string()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
            ("sparkline", "false".to_string()),
        ];
        let records: Vec<MarketRecord> = get_json(&self.client, &self.url, &query).await?;
        debug!(page, records = records.len(), "snapshot page fetched");
        Ok(records.into_iter().map(Listing::from).collect())
    }
}
