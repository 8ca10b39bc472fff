// Tweet feed: the signed-in user's own short posts.
//
// Every mutation refetches the list rather than patching it.

use std::collections::HashMap;

use tracing::warn;
use vidtube_api::Tweet;

use super::required;
use crate::context::Context;
use crate::error::CoreError;
use crate::scope::ViewScope;
use crate::toggle::{LikeToggle, ToggleOutcome};

pub struct TweetFeed {
    ctx: Context,
    scope: ViewScope,
    tweets: Vec<Tweet>,
    likes: HashMap<String, LikeToggle>,
}

impl TweetFeed {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            scope: ViewScope::new(),
            tweets: Vec::new(),
            likes: HashMap::new(),
        }
    }

    pub async fn load(&mut self) -> Result<&[Tweet], CoreError> {
        let user = self.ctx.session().require_identity("view your tweets")?;
        let api = self.ctx.api();
        match self
            .scope
            .run(self.ctx.call(api.user_tweets(&user.id)))
            .await
        {
            Ok(tweets) => {
                self.likes = tweets
                    .iter()
                    .map(|t| (t.id.clone(), LikeToggle::for_tweet(&self.ctx, t)))
                    .collect();
                self.tweets = tweets;
                Ok(&self.tweets)
            }
            Err(e) => {
                if !e.is_cancelled() {
                    warn!(error = %e, "failed to load tweets");
                    self.tweets.clear();
                    self.likes.clear();
                }
                Err(e)
            }
        }
    }

    pub fn tweets(&self) -> &[Tweet] {
        &self.tweets
    }

    pub async fn post(&mut self, content: &str) -> Result<&[Tweet], CoreError> {
        self.ctx.session().require_identity("tweet")?;
        let content = required("Tweet", content)?;
        let api = self.ctx.api();
        self.ctx.call(api.create_tweet(&content)).await?;
        self.load().await
    }

    pub async fn edit(&mut self, tweet_id: &str, content: &str) -> Result<&[Tweet], CoreError> {
        self.ctx.session().require_identity("edit tweets")?;
        let content = required("Tweet", content)?;
        let api = self.ctx.api();
        self.ctx.call(api.update_tweet(tweet_id, &content)).await?;
        self.load().await
    }

    pub async fn delete(&mut self, tweet_id: &str) -> Result<&[Tweet], CoreError> {
        self.ctx.session().require_identity("delete tweets")?;
        let api = self.ctx.api();
        self.ctx.call(api.delete_tweet(tweet_id)).await?;
        self.load().await
    }

    pub async fn toggle_like(&mut self, tweet_id: &str) -> Result<ToggleOutcome, CoreError> {
        let Some(like) = self.likes.get(tweet_id) else {
            return Err(CoreError::not_found("Tweet", tweet_id));
        };
        let outcome = like.toggle().await?;
        if let ToggleOutcome::Applied(state) = outcome {
            if let Some(tweet) = self.tweets.iter_mut().find(|t| t.id == tweet_id) {
                tweet.is_liked = state.active;
                tweet.likes_count = state.count.unwrap_or(tweet.likes_count);
            }
        }
        Ok(outcome)
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }
}
