// Video player page
//
// Loads one video, drives its like toggle, and saves it into one of the
// viewer's playlists. The playlist picker is 1-based, matching what the
// viewer is shown.

use tracing::{debug, warn};
use vidtube_api::{Playlist, Video};

use crate::context::Context;
use crate::error::CoreError;
use crate::scope::ViewScope;
use crate::toggle::{LikeToggle, ToggleOutcome};

pub struct VideoPlayer {
    ctx: Context,
    scope: ViewScope,
    video_id: String,
    video: Option<Video>,
    like: Option<LikeToggle>,
    playlists: Vec<Playlist>,
}

impl VideoPlayer {
    pub fn new(ctx: &Context, video_id: impl Into<String>) -> Self {
        Self {
            ctx: ctx.clone(),
            scope: ViewScope::new(),
            video_id: video_id.into(),
            video: None,
            like: None,
            playlists: Vec::new(),
        }
    }

    /// Fetch the video and derive its like control.
    pub async fn load(&mut self) -> Result<&Video, CoreError> {
        let api = self.ctx.api();
        let fetched = self
            .scope
            .run(self.ctx.call(api.get_video(&self.video_id)))
            .await
            .and_then(|v| v.ok_or_else(|| CoreError::not_found("Video", self.video_id.clone())));
        match fetched {
            Ok(video) => {
                match &self.like {
                    Some(like) => like.sync(video.is_liked, video.likes_count),
                    None => self.like = Some(LikeToggle::for_video(&self.ctx, &video)),
                }
                Ok(&*self.video.insert(video))
            }
            Err(e) => {
                if !e.is_cancelled() {
                    warn!(error = %e, video_id = %self.video_id, "failed to load video");
                    self.video = None;
                }
                Err(e)
            }
        }
    }

    pub fn video(&self) -> Option<&Video> {
        self.video.as_ref()
    }

    pub fn like(&self) -> Option<&LikeToggle> {
        self.like.as_ref()
    }

    /// Toggle the like and patch the loaded snapshot.
    pub async fn toggle_like(&mut self) -> Result<ToggleOutcome, CoreError> {
        let Some(like) = self.like.as_ref() else {
            return Err(CoreError::not_found("Video", self.video_id.clone()));
        };
        let outcome = like.toggle().await?;
        if let (ToggleOutcome::Applied(state), Some(video)) = (outcome, self.video.as_mut()) {
            video.is_liked = state.active;
            video.likes_count = state.count.unwrap_or(video.likes_count);
        }
        Ok(outcome)
    }

    // ── Save to playlist ─────────────────────────────────────────

    /// Fetch the viewer's playlists for the picker.
    pub async fn load_playlists(&mut self) -> Result<&[Playlist], CoreError> {
        let user = self.ctx.session().require_identity("save videos")?;
        let api = self.ctx.api();
        self.playlists = self
            .scope
            .run(self.ctx.call(api.user_playlists(&user.id)))
            .await?;
        Ok(&self.playlists)
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Add the video to the playlist at 1-based `selection`.
    ///
    /// Rejected locally when there are no playlists, the selection is
    /// out of range, or the video is already in that playlist.
    pub async fn save_to_playlist(&mut self, selection: usize) -> Result<&Playlist, CoreError> {
        self.ctx.session().require_identity("save videos")?;
        if self.playlists.is_empty() {
            return Err(CoreError::validation(
                "You have no playlists. Create one first.",
            ));
        }
        let index = selection.checked_sub(1).unwrap_or(usize::MAX);
        let Some(playlist) = self.playlists.get(index) else {
            return Err(CoreError::validation("Invalid playlist selection"));
        };
        if playlist.contains(&self.video_id) {
            return Err(CoreError::validation("Video already exists in this playlist"));
        }

        let api = self.ctx.api();
        self.ctx
            .call(api.add_video_to_playlist(&self.video_id, &playlist.id))
            .await?;
        debug!(video_id = %self.video_id, playlist = %playlist.name, "video saved to playlist");

        let Some(playlist) = self.playlists.get_mut(index) else {
            return Err(CoreError::validation("Invalid playlist selection"));
        };
        playlist.videos.push(self.video_id.clone());
        Ok(&*playlist)
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }
}
