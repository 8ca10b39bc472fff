// Channel page
//
// A public profile, its videos, and the owner's tweets. The tweets
// request needs the profile's id, so the two loads run in sequence.

use tracing::warn;
use vidtube_api::{ChannelProfile, Tweet, Video};

use crate::context::Context;
use crate::error::CoreError;
use crate::scope::ViewScope;
use crate::toggle::{SubscribeToggle, ToggleOutcome};

pub struct ChannelPage {
    ctx: Context,
    scope: ViewScope,
    username: String,
    profile: Option<ChannelProfile>,
    tweets: Vec<Tweet>,
    subscribe: Option<SubscribeToggle>,
}

impl ChannelPage {
    pub fn new(ctx: &Context, username: impl Into<String>) -> Self {
        Self {
            ctx: ctx.clone(),
            scope: ViewScope::new(),
            username: username.into(),
            profile: None,
            tweets: Vec::new(),
            subscribe: None,
        }
    }

    /// Load the profile, then the channel's tweets.
    ///
    /// A tweets failure is logged and leaves the list empty; the profile
    /// still renders.
    pub async fn load(&mut self) -> Result<&ChannelProfile, CoreError> {
        let api = self.ctx.api();
        let profile = match self
            .scope
            .run(self.ctx.call(api.channel_profile(&self.username)))
            .await
        {
            Ok(profile) => profile,
            Err(e) => {
                if !e.is_cancelled() {
                    warn!(error = %e, username = %self.username, "failed to load channel");
                    self.profile = None;
                    self.tweets.clear();
                }
                return Err(e);
            }
        };

        self.tweets = match self
            .scope
            .run(self.ctx.call(api.user_tweets(&profile.id)))
            .await
        {
            Ok(tweets) => tweets,
            Err(CoreError::Cancelled) => return Err(CoreError::Cancelled),
            Err(e) => {
                warn!(error = %e, channel_id = %profile.id, "failed to load channel tweets");
                Vec::new()
            }
        };

        match &self.subscribe {
            Some(toggle) if toggle.channel() == profile.username => {
                toggle.sync(profile.is_subscribed, profile.subscribers_count);
            }
            _ => self.subscribe = Some(SubscribeToggle::for_channel(&self.ctx, &profile)),
        }
        Ok(&*self.profile.insert(profile))
    }

    pub fn profile(&self) -> Option<&ChannelProfile> {
        self.profile.as_ref()
    }

    pub fn videos(&self) -> &[Video] {
        self.profile.as_ref().map_or(&[], |p| p.videos.as_slice())
    }

    pub fn tweets(&self) -> &[Tweet] {
        &self.tweets
    }

    pub fn subscribe(&self) -> Option<&SubscribeToggle> {
        self.subscribe.as_ref()
    }

    /// Toggle the subscription and patch the profile's counters.
    pub async fn toggle_subscription(&mut self) -> Result<ToggleOutcome, CoreError> {
        let Some(toggle) = self.subscribe.as_ref() else {
            return Err(CoreError::not_found("Channel", self.username.clone()));
        };
        let outcome = toggle.toggle().await?;
        if let (ToggleOutcome::Applied(state), Some(profile)) = (outcome, self.profile.as_mut()) {
            profile.is_subscribed = state.active;
            profile.subscribers_count = state.count.unwrap_or(profile.subscribers_count);
        }
        Ok(outcome)
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }
}
