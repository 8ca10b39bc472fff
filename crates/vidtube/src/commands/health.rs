//! Backend health check.

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::App;

pub async fn handle(app: &App, global: &GlobalOpts) -> Result<(), CliError> {
    let ctx = app.ctx();
    ctx.call(ctx.api().healthcheck()).await?;
    output::success(global, &format!("Backend at {} is up", ctx.api().base_url()));
    Ok(())
}
