// Comment endpoints
//
// Comments are listed per video; edits and deletions address the comment
// directly under `/comments/c/{id}`.

use serde_json::json;
use tracing::debug;

use crate::client::{ApiClient, segment};
use crate::envelope;
use crate::error::Error;
use crate::models::Comment;

impl ApiClient {
    /// List a video's comments.
    ///
    /// `GET /comments/{videoId}?page=&limit=`: the list sits under
    /// `data.comments`. A missing or malformed list decodes as empty.
    pub async fn video_comments(
        &self,
        video_id: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Vec<Comment>, Error> {
        let mut params = Vec::new();
        if let Some(page) = page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        let resp = self
            .http()
            .get(&format!("/comments/{}", segment(video_id)), &params)
            .await?;
        Ok(envelope::nested_list_or_empty(&resp, "comments"))
    }

    /// `POST /comments/{videoId}` with `{"content": "..."}`
    pub async fn add_comment(&self, video_id: &str, content: &str) -> Result<Comment, Error> {
        debug!(video_id, "adding comment");
        let resp = self
            .http()
            .post_json(
                &format!("/comments/{}", segment(video_id)),
                &json!({ "content": content }),
            )
            .await?;
        envelope::data(&resp)
    }

    /// `PATCH /comments/c/{commentId}` with `{"content": "..."}`
    pub async fn update_comment(&self, comment_id: &str, content: &str) -> Result<Comment, Error> {
        debug!(comment_id, "updating comment");
        let resp = self
            .http()
            .patch_json(
                &format!("/comments/c/{}", segment(comment_id)),
                &json!({ "content": content }),
            )
            .await?;
        envelope::data(&resp)
    }

    /// `DELETE /comments/c/{commentId}`
    pub async fn delete_comment(&self, comment_id: &str) -> Result<(), Error> {
        debug!(comment_id, "deleting comment");
        self.http()
            .delete(&format!("/comments/c/{}", segment(comment_id)))
            .await?;
        Ok(())
    }
}
