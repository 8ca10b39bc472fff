//! Command dispatch: bridges CLI args -> page controllers -> output formatting.

pub mod auth;
pub mod channel;
pub mod comments;
pub mod config_cmd;
pub mod health;
pub mod playlists;
pub mod profile;
pub mod route;
pub mod studio;
pub mod tweets;
pub mod util;
pub mod videos;

use std::sync::Arc;

use tracing::debug;
use vidtube_core::{ClientConfig, Context, Navigator, Route, User};

use crate::cli::{Command, GlobalOpts};
use crate::config::{self, Profile};
use crate::error::CliError;

// ── Navigator ───────────────────────────────────────────────────────

/// A terminal has no views to switch; navigation requests are logged.
struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: Route) {
        debug!(%route, "navigate");
    }
}

// ── App ─────────────────────────────────────────────────────────────

/// The client context plus the profile it was built from.
pub struct App {
    ctx: Context,
    profile: Profile,
    profile_name: String,
}

impl App {
    pub fn connect(
        client: &ClientConfig,
        profile: Profile,
        profile_name: String,
    ) -> Result<Self, CliError> {
        let ctx = Context::new(client, Arc::new(TracingNavigator))?;
        Ok(Self {
            ctx,
            profile,
            profile_name,
        })
    }

    pub fn ctx(&self) -> &Context {
        &self.ctx
    }

    /// Sign in with the profile's credentials.
    ///
    /// `action` names what needs the session, for the error shown when the
    /// profile has no login.
    pub async fn sign_in(&self, action: &str) -> Result<User, CliError> {
        match config::credentials(&self.profile, &self.profile_name)? {
            Some(credentials) => Ok(self.ctx.session().login(&credentials).await?),
            None => Err(CliError::LoginRequired {
                action: action.to_owned(),
            }),
        }
    }

    /// Sign in when the profile has credentials, otherwise stay anonymous.
    ///
    /// Used by public views, where being signed in only adds the viewer's
    /// own like and subscription state.
    pub async fn sign_in_if_configured(&self) -> Result<Option<User>, CliError> {
        match config::credentials(&self.profile, &self.profile_name)? {
            Some(credentials) => Ok(Some(self.ctx.session().login(&credentials).await?)),
            None => {
                debug!("no credentials in profile, continuing anonymously");
                Ok(self.ctx.session().rehydrate().await)
            }
        }
    }
}

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, app: &App, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Auth(args) => auth::handle(app, args, global).await,
        Command::Videos(args) => videos::handle(app, args, global).await,
        Command::Channel(args) => channel::handle(app, args, global).await,
        Command::Comments(args) => comments::handle(app, args, global).await,
        Command::Playlists(args) => playlists::handle(app, args, global).await,
        Command::Tweets(args) => tweets::handle(app, args, global).await,
        Command::Studio(args) => studio::handle(app, args, global).await,
        Command::Profile(args) => profile::handle(app, args, global).await,
        Command::Subscriptions => channel::subscriptions(app, global).await,
        Command::Health => health::handle(app, global).await,
        Command::Route(args) => route::handle(app, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
