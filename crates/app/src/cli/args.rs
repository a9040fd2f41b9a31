pub use clap::Parser;

use url::Url;

use service::config::{Config, GatewayMode};

#[derive(Parser, Debug)]
#[command(name = "sealdrop")]
#[command(about = "Encrypted file drops over a content-addressed gateway")]
pub struct Args {
    /// HTTP API endpoint of a trusted local node
    #[arg(long, global = true, default_value = "http://localhost:5001")]
    pub api_url: Url,

    /// Gateway endpoint used for reads (and hosted writes)
    #[arg(long, global = true, default_value = "http://localhost:8080")]
    pub gateway_url: Url,

    /// Target a public hosted gateway instead of a trusted local node
    #[arg(long, global = true)]
    pub hosted: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: crate::Command,
}

impl Args {
    pub fn to_config(&self) -> Config {
        Config {
            mode: if self.hosted {
                GatewayMode::Hosted
            } else {
                GatewayMode::Api
            },
            api_url: self.api_url.clone(),
            gateway_url: self.gateway_url.clone(),
            log_level: self.log_level.parse().unwrap_or(tracing::Level::INFO),
        }
    }
}
