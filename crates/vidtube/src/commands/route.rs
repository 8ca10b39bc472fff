//! Route resolution against the current session.

use serde::Serialize;
use vidtube_core::RouteDecision;
use vidtube_core::routes;

use crate::cli::{GlobalOpts, RouteArgs};
use crate::error::CliError;
use crate::output;

use super::App;

#[derive(Serialize)]
struct Resolution {
    path: String,
    decision: &'static str,
    target: Option<String>,
    session: String,
}

pub async fn handle(app: &App, args: RouteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let session = app.ctx().session();
    if args.anonymous {
        session.rehydrate().await;
    } else {
        app.sign_in_if_configured().await?;
    }
    let state = session.state();

    let (decision, target) = match routes::resolve(&args.path, &state) {
        RouteDecision::Render(route) => ("render", Some(route.path())),
        RouteDecision::Loading => ("loading", None),
        RouteDecision::Redirect(route) => ("redirect", Some(route.path())),
    };
    let resolution = Resolution {
        path: args.path,
        decision,
        target,
        session: state.phase.to_string(),
    };

    let out = output::render_single(
        &global.output,
        &resolution,
        |r| match r.target {
            Some(ref target) => format!("{} -> {} {target} ({})", r.path, r.decision, r.session),
            None => format!("{} -> {} ({})", r.path, r.decision, r.session),
        },
        |r| r.target.clone().unwrap_or_default(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
