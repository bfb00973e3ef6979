use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_optional_env_var;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::{request_params::MarketsRequestParams, snapshot::Snapshot},
    providers::{
        ApiSnafu, ClientBuildSnafu, DecodeSnafu, InvalidApiKeySnafu, ProviderError,
        ProviderInitError, ReqwestSnafu, SnapshotSource,
        coingecko_rest::{
            params::{construct_params, validate_params},
            response::{CoinGeckoMarket, into_snapshots},
        },
    },
};

/// Public API root.
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

const MARKETS_PATH: &str = "/coins/markets";
const API_KEY_ENV: &str = "COINGECKO_API_KEY";
const API_KEY_HEADER: &str = "x-cg-demo-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
// Error bodies are echoed into logs; keep them short.
const MAX_ERROR_BODY: usize = 512;

pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    /// Creates a provider against the public API.
    ///
    /// Picks up an optional demo API key from `COINGECKO_API_KEY`; without one
    /// the keyless public tier is used.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a provider against a custom API root (a proxy, a mirror, or a local test server).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderInitError> {
        let api_key = get_optional_env_var(API_KEY_ENV).map(|k| SecretString::new(k.into()));
        let headers = default_headers(api_key.as_ref())?;

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("coin-tracker/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn markets_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), MARKETS_PATH)
    }
}

/// Headers sent with every request. The API key, when present, is marked
/// sensitive so it stays out of debug output.
fn default_headers(
    api_key: Option<&SecretString>,
) -> Result<header::HeaderMap, ProviderInitError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );
    if let Some(key) = api_key {
        let mut value =
            header::HeaderValue::from_str(key.expose_secret()).context(InvalidApiKeySnafu)?;
        value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, value);
    }
    Ok(headers)
}

#[async_trait]
impl SnapshotSource for CoinGeckoProvider {
    async fn fetch_snapshots(
        &self,
        params: MarketsRequestParams,
    ) -> Result<Vec<Snapshot>, ProviderError> {
        validate_params(&params)?;

        let url = self.markets_url();
        debug!(%url, vs_currency = %params.vs_currency, top_n = params.top_n, "requesting markets");

        let response = self
            .client
            .get(&url)
            .query(&construct_params(&params))
            .send()
            .await
            .context(ReqwestSnafu)?;

        let status = response.status();
        let body = response.text().await.context(ReqwestSnafu)?;

        if !status.is_success() {
            let mut message = body;
            if message.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !message.is_char_boundary(cut) {
                    cut -= 1;
                }
                message.truncate(cut);
            }
            return ApiSnafu {
                status: status.as_u16(),
                message,
            }
            .fail();
        }

        let markets: Vec<CoinGeckoMarket> = serde_json::from_str(&body).context(DecodeSnafu)?;
        let snapshots = into_snapshots(markets, params.top_n);
        debug!(count = snapshots.len(), "decoded market snapshots");

        Ok(snapshots)
    }
}
