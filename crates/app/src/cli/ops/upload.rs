use std::path::PathBuf;

use clap::Args;

use common::wire::Payload;
use service::transfer::{self, TransferError};

#[derive(Args, Debug, Clone)]
pub struct Upload {
    /// File to encrypt and upload
    pub path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("path has no usable file name")]
    NoFileName,
    #[error(transparent)]
    Transfer(#[from] TransferError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Upload {
    type Error = UploadError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let filename = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or(UploadError::NoFileName)?
            .to_string();
        let data = tokio::fs::read(&self.path).await?;

        let payload = Payload { filename, data };
        let result =
            transfer::upload(&ctx.gateway, ctx.config.max_payload_size(), payload).await?;

        Ok(format!(
            "address: {}\nhash: {}\nfilename: {}",
            result.address, result.hash, result.filename
        ))
    }
}
