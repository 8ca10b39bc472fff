// Like endpoints
//
// One toggle per likeable entity. The backend flips its own record and
// reports the result; callers decide whether to trust it.

use strum::{Display, EnumString};
use tracing::debug;

use crate::client::{ApiClient, segment};
use crate::envelope;
use crate::error::Error;
use crate::models::{ToggleReceipt, Video};

/// Which kind of entity a like toggle addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LikeTarget {
    Video,
    Comment,
    Tweet,
}

impl LikeTarget {
    /// Path segment used by `/likes/toggle/{segment}/{id}`.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Video => "v",
            Self::Comment => "c",
            Self::Tweet => "t",
        }
    }
}

impl ApiClient {
    /// `POST /likes/toggle/{v|c|t}/{id}`
    pub async fn toggle_like(&self, target: LikeTarget, id: &str) -> Result<ToggleReceipt, Error> {
        debug!(%target, id, "toggling like");
        let resp = self
            .http()
            .post(&format!(
                "/likes/toggle/{}/{}",
                target.path_segment(),
                segment(id)
            ))
            .await?;
        Ok(envelope::toggle(&resp, "isLiked"))
    }

    pub async fn toggle_video_like(&self, video_id: &str) -> Result<ToggleReceipt, Error> {
        self.toggle_like(LikeTarget::Video, video_id).await
    }

    pub async fn toggle_comment_like(&self, comment_id: &str) -> Result<ToggleReceipt, Error> {
        self.toggle_like(LikeTarget::Comment, comment_id).await
    }

    pub async fn toggle_tweet_like(&self, tweet_id: &str) -> Result<ToggleReceipt, Error> {
        self.toggle_like(LikeTarget::Tweet, tweet_id).await
    }

    /// Videos liked by the signed-in user.
    ///
    /// `GET /likes/videos`
    pub async fn liked_videos(&self) -> Result<Vec<Video>, Error> {
        let resp = self.http().get("/likes/videos", &[]).await?;
        envelope::list(&resp)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::LikeTarget;

    #[test]
    fn like_target_parses_lowercase_names() {
        assert_eq!(LikeTarget::from_str("tweet").ok(), Some(LikeTarget::Tweet));
        assert_eq!(LikeTarget::Comment.to_string(), "comment");
        assert_eq!(LikeTarget::Video.path_segment(), "v");
    }
}
