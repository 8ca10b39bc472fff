// Video endpoints
//
// Feed listing, detail lookup, and the owner-side publish/edit/delete
// operations. Publishing streams both files and can report progress.

use reqwest::multipart::Form;
use tracing::debug;

use crate::client::{ApiClient, segment};
use crate::envelope;
use crate::error::Error;
use crate::models::{ToggleReceipt, Video, VideoDraft, VideoFeed, VideoQuery, VideoUpdate};
use crate::upload::{ProgressFn, ProgressTracker, file_part};

impl ApiClient {
    /// List published videos.
    ///
    /// `GET /videos?page=&limit=&query=&sortBy=&sortType=&userId=`: the
    /// page sits in `data`, with the videos under `data.videos`.
    pub async fn list_videos(&self, query: &VideoQuery) -> Result<VideoFeed, Error> {
        let params = query.to_params();
        debug!(?params, "listing videos");
        let resp = self.http().get("/videos", &params).await?;
        let mut feed: VideoFeed = envelope::optional_data(&resp)
            .unwrap_or_default()
            .unwrap_or_default();
        if feed.videos.is_empty() {
            feed.videos = envelope::nested_list_or_empty(&resp, "videos");
        }
        Ok(feed)
    }

    /// Upload and publish a new video.
    ///
    /// `POST /videos` (multipart: title, description, videoFile, thumbnail).
    /// `progress` is called as file bytes are handed to the transport.
    pub async fn publish_video(
        &self,
        draft: &VideoDraft,
        progress: Option<ProgressFn>,
    ) -> Result<Video, Error> {
        debug!(title = %draft.title, size = draft.video_file.len(), "publishing video");
        let tracker = progress.map(|callback| {
            ProgressTracker::new(draft.video_file.len() + draft.thumbnail.len(), callback)
        });
        let form = Form::new()
            .text("title", draft.title.clone())
            .text("description", draft.description.clone())
            .part("videoFile", file_part(&draft.video_file, tracker.as_ref())?)
            .part("thumbnail", file_part(&draft.thumbnail, tracker.as_ref())?);
        let resp = self.http().post_multipart("/videos", form).await?;
        envelope::data(&resp)
    }

    /// Fetch one video. The backend answers with a one-element array;
    /// `None` when it is empty.
    ///
    /// `GET /videos/{id}`
    pub async fn get_video(&self, video_id: &str) -> Result<Option<Video>, Error> {
        let resp = self
            .http()
            .get(&format!("/videos/{}", segment(video_id)), &[])
            .await?;
        envelope::first(&resp)
    }

    /// `DELETE /videos/{id}`
    pub async fn delete_video(&self, video_id: &str) -> Result<(), Error> {
        debug!(video_id, "deleting video");
        self.http()
            .delete(&format!("/videos/{}", segment(video_id)))
            .await?;
        Ok(())
    }

    /// Edit title/description, optionally replacing the thumbnail.
    ///
    /// `PATCH /videos/{id}` (multipart)
    pub async fn update_video(&self, video_id: &str, update: &VideoUpdate) -> Result<Video, Error> {
        debug!(video_id, "updating video");
        let mut form = Form::new()
            .text("title", update.title.clone())
            .text("description", update.description.clone());
        if let Some(ref thumbnail) = update.thumbnail {
            form = form.part("thumbnail", file_part(thumbnail, None)?);
        }
        let resp = self
            .http()
            .patch_multipart(&format!("/videos/{}", segment(video_id)), form)
            .await?;
        envelope::data(&resp)
    }

    /// `PATCH /videos/toggle/publish/{id}`
    pub async fn toggle_publish_status(&self, video_id: &str) -> Result<ToggleReceipt, Error> {
        debug!(video_id, "toggling publish status");
        let resp = self
            .http()
            .patch(&format!("/videos/toggle/publish/{}", segment(video_id)))
            .await?;
        Ok(envelope::toggle(&resp, "isPublished"))
    }
}
