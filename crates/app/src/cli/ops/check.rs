use std::convert::Infallible;

use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct Check;

#[async_trait::async_trait]
impl crate::cli::op::Op for Check {
    // A read-only gateway is a valid answer, not a failure; the probe
    // swallows transport errors into the cached boolean.
    type Error = Infallible;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        if ctx.gateway.is_writable().await {
            Ok("gateway accepts writes".to_string())
        } else {
            Ok("gateway is read-only".to_string())
        }
    }
}
