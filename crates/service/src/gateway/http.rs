use async_trait::async_trait;
use reqwest::{multipart, Client};
use serde::Deserialize;
use tokio::sync::OnceCell;
use url::Url;

use crate::config::{Config, GatewayMode};

use super::{BlobGateway, GatewayError};

/// Body used by the one-shot writability probe
const WRITE_PROBE: &[u8] = b"test writable";

/// HTTP client for an IPFS-style content-addressed gateway
///
/// Two write transports, selected by [`GatewayMode`]:
/// - `Api`: multipart POST to the node's `/api/v0/add`, hash in the JSON body
/// - `Hosted`: raw POST to the gateway's `/ipfs/` route, hash in the
///   `Ipfs-Hash` response header
///
/// Reads always GET `/ipfs/{hash}` from the gateway endpoint.
#[derive(Debug)]
pub struct HttpGateway {
    client: Client,
    mode: GatewayMode,
    api_url: Url,
    gateway_url: Url,
    /// Cached writability probe result. Computed at most once per process;
    /// intentionally never invalidated, since gateway writability does not
    /// change within a session.
    writable: OnceCell<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AddResponse {
    hash: String,
}

impl HttpGateway {
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            mode: config.mode,
            api_url: config.api_url.clone(),
            gateway_url: config.gateway_url.clone(),
            writable: OnceCell::new(),
        })
    }

    /// Whether this gateway currently accepts writes
    ///
    /// Determined by a cheap probe write; read-only deployments reject it.
    pub async fn is_writable(&self) -> bool {
        *self
            .writable
            .get_or_init(|| async { self.write(WRITE_PROBE).await.is_ok() })
            .await
    }

    async fn write_api(&self, bytes: &[u8]) -> Result<String, GatewayError> {
        let url = self.api_url.join("/api/v0/add")?;
        let part = multipart::Part::bytes(bytes.to_vec()).file_name("data");
        let form = multipart::Form::new().part("arg", part);

        let response = self
            .client
            .post(url)
            .query(&[("pin", "false")])
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(GatewayError::WriteFailed { status, detail });
        }

        let add: AddResponse = response.json().await?;
        Ok(add.hash)
    }

    async fn write_hosted(&self, bytes: &[u8]) -> Result<String, GatewayError> {
        let url = self.gateway_url.join("/ipfs/")?;
        let response = self.client.post(url).body(bytes.to_vec()).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(GatewayError::WriteFailed { status, detail });
        }

        response
            .headers()
            .get("Ipfs-Hash")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .ok_or(GatewayError::MissingHash)
    }
}

#[async_trait]
impl BlobGateway for HttpGateway {
    async fn write(&self, bytes: &[u8]) -> Result<String, GatewayError> {
        tracing::debug!(size = bytes.len(), mode = ?self.mode, "writing blob");
        let hash = match self.mode {
            GatewayMode::Api => self.write_api(bytes).await?,
            GatewayMode::Hosted => self.write_hosted(bytes).await?,
        };
        tracing::debug!(%hash, "blob written");
        Ok(hash)
    }

    async fn read(&self, hash: &str) -> Result<Vec<u8>, GatewayError> {
        let url = self.gateway_url.join(&format!("/ipfs/{}", hash))?;
        tracing::debug!(%hash, "reading blob");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(GatewayError::ReadFailed { status, detail });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
