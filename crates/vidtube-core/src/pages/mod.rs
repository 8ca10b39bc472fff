// ── Page controllers ──
//
// One headless controller per view. Each owns its snapshots, runs its
// loads inside a `ViewScope`, and handles errors at its own boundary:
// failed loads leave empty state, failed mutations return the error for
// the caller to report.

mod channel;
mod comments;
mod home;
mod playlists;
mod profile;
mod studio;
mod tweets;
mod upload;
mod video;

pub use channel::ChannelPage;
pub use comments::CommentThread;
pub use home::HomeFeed;
pub use playlists::{PlaylistDetail, PlaylistLibrary};
pub use profile::ProfilePage;
pub use studio::ChannelStudio;
pub use tweets::TweetFeed;
pub use upload::{UploadForm, VideoUpload};
pub use video::VideoPlayer;

use crate::error::CoreError;

/// Trim `value`, rejecting it when nothing is left.
pub(crate) fn required(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CoreError::validation(format!("{field} cannot be empty")))
    } else {
        Ok(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("Comment", "  hi \n").ok().as_deref(), Some("hi"));
        let err = required("Comment", " \t ").err().map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("Comment cannot be empty"));
    }
}
