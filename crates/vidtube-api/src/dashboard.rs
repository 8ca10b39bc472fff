// Dashboard endpoints
//
// Aggregates for the signed-in user's own channel.

use crate::client::{ApiClient, segment};
use crate::envelope;
use crate::error::Error;
use crate::models::{ChannelStats, Video};

impl ApiClient {
    /// `GET /dashboard/stats`
    pub async fn channel_stats(&self) -> Result<ChannelStats, Error> {
        let resp = self.http().get("/dashboard/stats", &[]).await?;
        Ok(envelope::optional_data(&resp)?.unwrap_or_default())
    }

    /// All videos of the signed-in user's channel, published or not.
    ///
    /// `GET /dashboard/videos`: a non-array `data` decodes as empty.
    pub async fn channel_videos(&self) -> Result<Vec<Video>, Error> {
        let resp = self.http().get("/dashboard/videos", &[]).await?;
        Ok(envelope::list_or_empty(&resp))
    }

    /// Engagement summary for one video of a channel.
    ///
    /// `GET /dashboard/engagement/{videoId}/{channelId}`: returned loosely
    /// typed; the field set is not stable across backend versions.
    pub async fn engagement_status(
        &self,
        video_id: &str,
        channel_id: &str,
    ) -> Result<serde_json::Value, Error> {
        let resp = self
            .http()
            .get(
                &format!(
                    "/dashboard/engagement/{}/{}",
                    segment(video_id),
                    segment(channel_id)
                ),
                &[],
            )
            .await?;
        Ok(resp.data().clone())
    }
}
