// Tweet endpoints

use serde_json::json;
use tracing::debug;

use crate::client::{ApiClient, segment};
use crate::envelope;
use crate::error::Error;
use crate::models::Tweet;

impl ApiClient {
    /// `POST /tweets` with `{"content": "..."}`
    pub async fn create_tweet(&self, content: &str) -> Result<Tweet, Error> {
        debug!("creating tweet");
        let resp = self
            .http()
            .post_json("/tweets", &json!({ "content": content }))
            .await?;
        envelope::data(&resp)
    }

    /// `GET /tweets/user/{userId}`
    pub async fn user_tweets(&self, user_id: &str) -> Result<Vec<Tweet>, Error> {
        let resp = self
            .http()
            .get(&format!("/tweets/user/{}", segment(user_id)), &[])
            .await?;
        envelope::list(&resp)
    }

    /// `PATCH /tweets/{id}` with `{"content": "..."}`
    pub async fn update_tweet(&self, tweet_id: &str, content: &str) -> Result<Tweet, Error> {
        debug!(tweet_id, "updating tweet");
        let resp = self
            .http()
            .patch_json(
                &format!("/tweets/{}", segment(tweet_id)),
                &json!({ "content": content }),
            )
            .await?;
        envelope::data(&resp)
    }

    /// `DELETE /tweets/{id}`
    pub async fn delete_tweet(&self, tweet_id: &str) -> Result<(), Error> {
        debug!(tweet_id, "deleting tweet");
        self.http()
            .delete(&format!("/tweets/{}", segment(tweet_id)))
            .await?;
        Ok(())
    }
}
