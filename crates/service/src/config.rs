use url::Url;

/// Maximum serialized-payload size when writing through a trusted local
/// node's HTTP API
pub const API_SIZE_LIMIT: usize = 1024 * 1024 * 1024;
/// Maximum serialized-payload size when writing through a public hosted
/// gateway
pub const HOSTED_SIZE_LIMIT: usize = 100 * 1024 * 1024;

/// Which kind of gateway deployment writes go through
///
/// The two differ in endpoint shape, in where the content hash comes back
/// (JSON body vs. response header), and in how large a payload they accept.
/// The pipelines never see this; they only talk to the capability interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    /// Trusted local node exposing the HTTP API. The hash comes back in the
    /// JSON response body, which works cross-origin where a response header
    /// does not.
    Api,
    /// Public hosted gateway. Writes POST raw bytes and read the hash from
    /// the `Ipfs-Hash` response header.
    Hosted,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// which write transport and size tier to use
    pub mode: GatewayMode,
    /// HTTP API endpoint of a trusted local node,
    ///  only used for writes in `Api` mode
    pub api_url: Url,
    /// gateway endpoint used for all reads,
    ///  and for writes in `Hosted` mode
    pub gateway_url: Url,

    // misc
    pub log_level: tracing::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: GatewayMode::Api,
            api_url: Url::parse("http://localhost:5001").expect("hardcoded URL must parse"),
            gateway_url: Url::parse("http://localhost:8080").expect("hardcoded URL must parse"),
            log_level: tracing::Level::INFO,
        }
    }
}

impl Config {
    /// The active serialized-payload limit
    ///
    /// Enforced by the upload pipeline before any crypto or network work.
    /// A little bit of abuse prevention for public deployments; a trusted
    /// local node accepts much larger payloads.
    pub fn max_payload_size(&self) -> usize {
        match self.mode {
            GatewayMode::Api => API_SIZE_LIMIT,
            GatewayMode::Hosted => HOSTED_SIZE_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_local_node() {
        let config = Config::default();
        assert_eq!(config.mode, GatewayMode::Api);
        assert_eq!(config.api_url.as_str(), "http://localhost:5001/");
        assert_eq!(config.gateway_url.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_size_tiers() {
        let mut config = Config::default();
        assert_eq!(config.max_payload_size(), 1024 * 1024 * 1024);

        config.mode = GatewayMode::Hosted;
        assert_eq!(config.max_payload_size(), 100 * 1024 * 1024);
    }
}
