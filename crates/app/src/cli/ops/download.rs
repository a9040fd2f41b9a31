use std::path::{Path, PathBuf};

use clap::Args;

use common::address::{Address, AddressError};
use service::transfer::{self, TransferError};

#[derive(Args, Debug, Clone)]
pub struct Download {
    /// Address token shared by the sender
    pub address: String,

    /// Where to save the decrypted file (defaults to the original file name)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid address: {0}")]
    Address(#[from] AddressError),
    #[error("payload filename has no usable file component")]
    BadFileName,
    #[error(transparent)]
    Transfer(#[from] TransferError),
}

/// Pick the on-disk path for a decrypted payload.
///
/// The payload filename is sender-controlled. Only its final path component
/// is honored, so a crafted payload carrying a traversal or absolute path
/// cannot direct the write outside the working directory.
fn resolve_output(explicit: Option<&Path>, filename: &str) -> Result<PathBuf, DownloadError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    Path::new(filename)
        .file_name()
        .map(PathBuf::from)
        .ok_or(DownloadError::BadFileName)
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Download {
    type Error = DownloadError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // Surface the lookup hash before any key material is needed
        let hash = Address::extract_hash(&self.address)?;
        tracing::debug!(%hash, "fetching");

        let payload = transfer::download(&ctx.gateway, &self.address).await?;

        let output = resolve_output(self.output.as_deref(), &payload.filename)?;
        tokio::fs::write(&output, &payload.data).await?;

        Ok(format!(
            "saved {} bytes to {}",
            payload.data.len(),
            output.display()
        ))
    }
}
