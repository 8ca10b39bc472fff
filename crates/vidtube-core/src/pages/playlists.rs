// Playlist pages
//
// The library (the viewer's own playlists) and a single playlist's
// detail view. The detail view resolves each video id with its own
// request, all in flight together; one failure fails the whole batch.

use futures_util::future::try_join_all;
use tracing::{debug, warn};
use vidtube_api::{Playlist, PlaylistDraft, Video};

use super::required;
use crate::context::Context;
use crate::error::CoreError;
use crate::scope::ViewScope;

// ── PlaylistLibrary ──────────────────────────────────────────────

pub struct PlaylistLibrary {
    ctx: Context,
    scope: ViewScope,
    playlists: Vec<Playlist>,
}

impl PlaylistLibrary {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            scope: ViewScope::new(),
            playlists: Vec::new(),
        }
    }

    /// Fetch the signed-in user's playlists.
    pub async fn load(&mut self) -> Result<&[Playlist], CoreError> {
        let user = self.ctx.session().require_identity("view your playlists")?;
        let api = self.ctx.api();
        match self
            .scope
            .run(self.ctx.call(api.user_playlists(&user.id)))
            .await
        {
            Ok(playlists) => {
                self.playlists = playlists;
                Ok(&self.playlists)
            }
            Err(e) => {
                if !e.is_cancelled() {
                    warn!(error = %e, "failed to load playlists");
                    self.playlists.clear();
                }
                Err(e)
            }
        }
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub async fn create(&mut self, name: &str, description: &str) -> Result<&Playlist, CoreError> {
        self.ctx.session().require_identity("create playlists")?;
        let draft = PlaylistDraft {
            name: required("Playlist name", name)?,
            description: description.trim().to_owned(),
        };
        let api = self.ctx.api();
        let playlist = self.ctx.call(api.create_playlist(&draft)).await?;
        debug!(playlist_id = %playlist.id, "playlist created");
        self.playlists.push(playlist);
        self.playlists
            .last()
            .ok_or_else(|| CoreError::not_found("Playlist", draft.name))
    }

    pub async fn rename(
        &mut self,
        playlist_id: &str,
        name: &str,
        description: &str,
    ) -> Result<(), CoreError> {
        self.ctx.session().require_identity("edit playlists")?;
        let draft = PlaylistDraft {
            name: required("Playlist name", name)?,
            description: description.trim().to_owned(),
        };
        let api = self.ctx.api();
        self.ctx
            .call(api.update_playlist(playlist_id, &draft))
            .await?;
        if let Some(playlist) = self.playlists.iter_mut().find(|p| p.id == playlist_id) {
            playlist.name = draft.name;
            playlist.description = draft.description;
        }
        Ok(())
    }

    pub async fn delete(&mut self, playlist_id: &str) -> Result<(), CoreError> {
        self.ctx.session().require_identity("delete playlists")?;
        let api = self.ctx.api();
        self.ctx.call(api.delete_playlist(playlist_id)).await?;
        self.playlists.retain(|p| p.id != playlist_id);
        Ok(())
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }
}

// ── PlaylistDetail ───────────────────────────────────────────────

pub struct PlaylistDetail {
    ctx: Context,
    scope: ViewScope,
    playlist_id: String,
    playlist: Option<Playlist>,
    videos: Vec<Video>,
}

impl PlaylistDetail {
    pub fn new(ctx: &Context, playlist_id: impl Into<String>) -> Self {
        Self {
            ctx: ctx.clone(),
            scope: ViewScope::new(),
            playlist_id: playlist_id.into(),
            playlist: None,
            videos: Vec::new(),
        }
    }

    /// Fetch the playlist, then every video it references.
    ///
    /// Videos are only exposed when every request succeeds. Ids the
    /// backend no longer knows (an empty `data` array) are skipped.
    pub async fn load(&mut self) -> Result<&[Video], CoreError> {
        match self.scope.run(self.fetch()).await {
            Ok((playlist, videos)) => {
                self.playlist = Some(playlist);
                self.videos = videos;
                Ok(&self.videos)
            }
            Err(e) => {
                if !e.is_cancelled() {
                    warn!(error = %e, playlist_id = %self.playlist_id, "failed to load playlist");
                    self.playlist = None;
                    self.videos.clear();
                }
                Err(e)
            }
        }
    }

    async fn fetch(&self) -> Result<(Playlist, Vec<Video>), CoreError> {
        let api = self.ctx.api();
        let playlist = self
            .ctx
            .call(api.get_playlist(&self.playlist_id))
            .await?
            .ok_or_else(|| CoreError::not_found("Playlist", self.playlist_id.clone()))?;

        let total = playlist.videos.len();
        debug!(playlist_id = %playlist.id, total, "resolving playlist videos");
        let videos = try_join_all(
            playlist
                .videos
                .iter()
                .map(|id| self.ctx.call(api.get_video(id))),
        )
        .await
        .map_err(|e| CoreError::BatchFailed {
            total,
            source: Box::new(e),
        })?;

        Ok((playlist, videos.into_iter().flatten().collect()))
    }

    pub fn playlist(&self) -> Option<&Playlist> {
        self.playlist.as_ref()
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    /// Drop a video from this playlist.
    pub async fn remove_video(&mut self, video_id: &str) -> Result<(), CoreError> {
        self.ctx.session().require_identity("edit playlists")?;
        let api = self.ctx.api();
        self.ctx
            .call(api.remove_video_from_playlist(video_id, &self.playlist_id))
            .await?;
        self.videos.retain(|v| v.id != video_id);
        if let Some(playlist) = self.playlist.as_mut() {
            playlist.videos.retain(|id| id != video_id);
        }
        Ok(())
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }
}
