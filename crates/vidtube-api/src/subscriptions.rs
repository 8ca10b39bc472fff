// Subscription endpoints
//
// Channels are addressed by the identifier the page knows them by (the
// channel username on channel pages).

use tracing::debug;

use crate::client::{ApiClient, segment};
use crate::envelope;
use crate::error::Error;
use crate::models::{Subscription, ToggleReceipt};

impl ApiClient {
    /// Subscribe to or unsubscribe from a channel.
    ///
    /// `POST /subscriptions/c/{channel}`: `data.isSubscribed` carries the
    /// resulting state when the backend reports it.
    pub async fn toggle_subscription(&self, channel: &str) -> Result<ToggleReceipt, Error> {
        debug!(channel, "toggling subscription");
        let resp = self
            .http()
            .post(&format!("/subscriptions/c/{}", segment(channel)))
            .await?;
        Ok(envelope::toggle(&resp, "isSubscribed"))
    }

    /// Channels the signed-in user subscribes to.
    ///
    /// `GET /subscriptions/c`
    pub async fn subscribed_channels(&self) -> Result<Vec<Subscription>, Error> {
        let resp = self.http().get("/subscriptions/c", &[]).await?;
        envelope::list(&resp)
    }

    /// `GET /subscriptions/u/{channel}`
    pub async fn channel_subscribers(&self, channel: &str) -> Result<Vec<Subscription>, Error> {
        let resp = self
            .http()
            .get(&format!("/subscriptions/u/{}", segment(channel)), &[])
            .await?;
        envelope::list(&resp)
    }
}
