// Playlist endpoints
//
// A playlist stores video ids only; resolving them to full records is
// the caller's job.

use tracing::debug;

use crate::client::{ApiClient, segment};
use crate::envelope;
use crate::error::Error;
use crate::models::{Playlist, PlaylistDraft};

impl ApiClient {
    /// `POST /playlists` with `{"name", "description"}`
    pub async fn create_playlist(&self, draft: &PlaylistDraft) -> Result<Playlist, Error> {
        debug!(name = %draft.name, "creating playlist");
        let resp = self.http().post_json("/playlists", draft).await?;
        envelope::data(&resp)
    }

    /// `GET /playlists/{id}`: `None` when the backend returns no record.
    pub async fn get_playlist(&self, playlist_id: &str) -> Result<Option<Playlist>, Error> {
        let resp = self
            .http()
            .get(&format!("/playlists/{}", segment(playlist_id)), &[])
            .await?;
        envelope::optional_data(&resp)
    }

    /// `PATCH /playlists/{id}` with `{"name", "description"}`
    pub async fn update_playlist(
        &self,
        playlist_id: &str,
        draft: &PlaylistDraft,
    ) -> Result<Playlist, Error> {
        debug!(playlist_id, name = %draft.name, "updating playlist");
        let resp = self
            .http()
            .patch_json(&format!("/playlists/{}", segment(playlist_id)), draft)
            .await?;
        envelope::data(&resp)
    }

    /// `DELETE /playlists/{id}`
    pub async fn delete_playlist(&self, playlist_id: &str) -> Result<(), Error> {
        debug!(playlist_id, "deleting playlist");
        self.http()
            .delete(&format!("/playlists/{}", segment(playlist_id)))
            .await?;
        Ok(())
    }

    /// `PATCH /playlists/add/{videoId}/{playlistId}`
    pub async fn add_video_to_playlist(&self, video_id: &str, playlist_id: &str) -> Result<(), Error> {
        debug!(video_id, playlist_id, "adding video to playlist");
        self.http()
            .patch(&format!(
                "/playlists/add/{}/{}",
                segment(video_id),
                segment(playlist_id)
            ))
            .await?;
        Ok(())
    }

    /// `PATCH /playlists/remove/{videoId}/{playlistId}`
    pub async fn remove_video_from_playlist(
        &self,
        video_id: &str,
        playlist_id: &str,
    ) -> Result<(), Error> {
        debug!(video_id, playlist_id, "removing video from playlist");
        self.http()
            .patch(&format!(
                "/playlists/remove/{}/{}",
                segment(video_id),
                segment(playlist_id)
            ))
            .await?;
        Ok(())
    }

    /// `GET /playlists/user/{userId}`
    pub async fn user_playlists(&self, user_id: &str) -> Result<Vec<Playlist>, Error> {
        let resp = self
            .http()
            .get(&format!("/playlists/user/{}", segment(user_id)), &[])
            .await?;
        envelope::list(&resp)
    }
}
