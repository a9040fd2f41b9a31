pub mod config;
pub mod gateway;
pub mod transfer;

pub use config::{Config, GatewayMode};
pub use gateway::{BlobGateway, GatewayError, HttpGateway};
pub use transfer::{download, upload, TransferError, UploadResult};
