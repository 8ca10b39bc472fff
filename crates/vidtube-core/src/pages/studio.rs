// Channel studio: the owner's dashboard.
//
// Edits and publish toggles refetch the video list; deletions patch it.

use std::collections::HashMap;

use futures_util::future::try_join;
use tracing::{debug, warn};
use vidtube_api::{ChannelStats, FilePart, Video, VideoUpdate};

use super::required;
use crate::context::Context;
use crate::error::CoreError;
use crate::scope::ViewScope;
use crate::toggle::{PublishToggle, ToggleOutcome};

pub struct ChannelStudio {
    ctx: Context,
    scope: ViewScope,
    stats: ChannelStats,
    videos: Vec<Video>,
    publish: HashMap<String, PublishToggle>,
}

impl ChannelStudio {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            scope: ViewScope::new(),
            stats: ChannelStats::default(),
            videos: Vec::new(),
            publish: HashMap::new(),
        }
    }

    /// Fetch channel stats and the owner's videos together.
    pub async fn load(&mut self) -> Result<&[Video], CoreError> {
        self.ctx.session().require_identity("open the studio")?;
        let api = self.ctx.api();
        let both = try_join(
            self.ctx.call(api.channel_stats()),
            self.ctx.call(api.channel_videos()),
        );
        match self.scope.run(both).await {
            Ok((stats, videos)) => {
                self.stats = stats;
                self.apply_videos(videos);
                Ok(&self.videos)
            }
            Err(e) => {
                if !e.is_cancelled() {
                    warn!(error = %e, "failed to load studio");
                    self.stats = ChannelStats::default();
                    self.apply_videos(Vec::new());
                }
                Err(e)
            }
        }
    }

    /// Refetch only the video list.
    pub async fn reload_videos(&mut self) -> Result<&[Video], CoreError> {
        let api = self.ctx.api();
        let videos = self
            .scope
            .run(self.ctx.call(api.channel_videos()))
            .await?;
        self.apply_videos(videos);
        Ok(&self.videos)
    }

    pub fn stats(&self) -> &ChannelStats {
        &self.stats
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub async fn update_video(
        &mut self,
        video_id: &str,
        title: &str,
        description: &str,
        thumbnail: Option<FilePart>,
    ) -> Result<&[Video], CoreError> {
        self.ctx.session().require_identity("edit videos")?;
        let update = VideoUpdate {
            title: required("Title", title)?,
            description: required("Description", description)?,
            thumbnail,
        };
        let api = self.ctx.api();
        self.ctx.call(api.update_video(video_id, &update)).await?;
        debug!(video_id, "video updated");
        self.reload_videos().await
    }

    /// Flip a video between published and draft, then refetch.
    pub async fn toggle_publish(&mut self, video_id: &str) -> Result<ToggleOutcome, CoreError> {
        let Some(toggle) = self.publish.get(video_id) else {
            return Err(CoreError::not_found("Video", video_id));
        };
        let outcome = toggle.toggle().await?;
        if matches!(outcome, ToggleOutcome::Applied(_)) {
            self.reload_videos().await?;
        }
        Ok(outcome)
    }

    pub fn publish_toggle(&self, video_id: &str) -> Option<&PublishToggle> {
        self.publish.get(video_id)
    }

    pub async fn delete_video(&mut self, video_id: &str) -> Result<(), CoreError> {
        self.ctx.session().require_identity("delete videos")?;
        let api = self.ctx.api();
        self.ctx.call(api.delete_video(video_id)).await?;
        self.videos.retain(|v| v.id != video_id);
        self.publish.remove(video_id);
        Ok(())
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    fn apply_videos(&mut self, videos: Vec<Video>) {
        let mut previous = std::mem::take(&mut self.publish);
        self.publish = videos
            .iter()
            .map(|v| {
                let toggle = match previous.remove(&v.id) {
                    Some(toggle) => {
                        toggle.sync(v.is_published);
                        toggle
                    }
                    None => PublishToggle::for_video(&self.ctx, v),
                };
                (v.id.clone(), toggle)
            })
            .collect();
        self.videos = videos;
    }
}
