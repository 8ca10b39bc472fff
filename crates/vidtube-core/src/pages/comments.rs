// Comment thread under a video
//
// Loads the thread, then patches it in place as the viewer adds, edits,
// deletes and likes comments. Blank text never reaches the backend.

use std::collections::HashMap;

use tracing::{debug, warn};
use vidtube_api::Comment;

use super::required;
use crate::context::Context;
use crate::error::CoreError;
use crate::scope::ViewScope;
use crate::toggle::{LikeToggle, ToggleOutcome};

pub struct CommentThread {
    ctx: Context,
    scope: ViewScope,
    video_id: String,
    comments: Vec<Comment>,
    likes: HashMap<String, LikeToggle>,
}

impl CommentThread {
    pub fn new(ctx: &Context, video_id: impl Into<String>) -> Self {
        Self {
            ctx: ctx.clone(),
            scope: ViewScope::new(),
            video_id: video_id.into(),
            comments: Vec::new(),
            likes: HashMap::new(),
        }
    }

    /// Fetch the thread. A failed load leaves it empty.
    pub async fn load(&mut self) -> Result<&[Comment], CoreError> {
        let api = self.ctx.api();
        match self
            .scope
            .run(self.ctx.call(api.video_comments(&self.video_id, None, None)))
            .await
        {
            Ok(comments) => {
                self.comments = comments;
                self.rebuild_likes();
                Ok(&self.comments)
            }
            Err(e) => {
                if !e.is_cancelled() {
                    warn!(error = %e, video_id = %self.video_id, "failed to load comments");
                    self.comments.clear();
                    self.likes.clear();
                }
                Err(e)
            }
        }
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Post a comment and put it at the top of the thread.
    pub async fn add(&mut self, content: &str) -> Result<&Comment, CoreError> {
        self.ctx.session().require_identity("comment")?;
        let content = required("Comment", content)?;
        let api = self.ctx.api();
        let comment = self
            .ctx
            .call(api.add_comment(&self.video_id, &content))
            .await?;
        debug!(comment_id = %comment.id, "comment added");
        self.likes.insert(
            comment.id.clone(),
            LikeToggle::for_comment(&self.ctx, &comment),
        );
        self.comments.insert(0, comment);
        self.comments
            .first()
            .ok_or_else(|| CoreError::not_found("Comment", "new"))
    }

    /// Replace a comment's text.
    pub async fn edit(&mut self, comment_id: &str, content: &str) -> Result<(), CoreError> {
        self.ctx.session().require_identity("edit comments")?;
        let content = required("Comment", content)?;
        let api = self.ctx.api();
        let updated = self
            .ctx
            .call(api.update_comment(comment_id, &content))
            .await?;
        if let Some(comment) = self.comments.iter_mut().find(|c| c.id == comment_id) {
            // The reply is the bare document: owner unpopulated, no like state.
            *comment = Comment {
                owner: comment.owner.take().or(updated.owner),
                likes_count: comment.likes_count,
                is_liked: comment.is_liked,
                ..updated
            };
        }
        Ok(())
    }

    pub async fn delete(&mut self, comment_id: &str) -> Result<(), CoreError> {
        self.ctx.session().require_identity("delete comments")?;
        let api = self.ctx.api();
        self.ctx.call(api.delete_comment(comment_id)).await?;
        self.comments.retain(|c| c.id != comment_id);
        self.likes.remove(comment_id);
        Ok(())
    }

    /// Toggle the like on one comment and patch its counters.
    pub async fn toggle_like(&mut self, comment_id: &str) -> Result<ToggleOutcome, CoreError> {
        let Some(like) = self.likes.get(comment_id) else {
            return Err(CoreError::not_found("Comment", comment_id));
        };
        let outcome = like.toggle().await?;
        if let ToggleOutcome::Applied(state) = outcome {
            if let Some(comment) = self.comments.iter_mut().find(|c| c.id == comment_id) {
                comment.is_liked = state.active;
                comment.likes_count = state.count.unwrap_or(comment.likes_count);
            }
        }
        Ok(outcome)
    }

    pub fn like(&self, comment_id: &str) -> Option<&LikeToggle> {
        self.likes.get(comment_id)
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    fn rebuild_likes(&mut self) {
        let mut previous = std::mem::take(&mut self.likes);
        self.likes = self
            .comments
            .iter()
            .map(|c| {
                let like = match previous.remove(&c.id) {
                    Some(like) => {
                        like.sync(c.is_liked, c.likes_count);
                        like
                    }
                    None => LikeToggle::for_comment(&self.ctx, c),
                };
                (c.id.clone(), like)
            })
            .collect();
    }
}
