// Video upload page
//
// Collects the four required fields, streams the files, and publishes
// the upload percentage on a watch channel while the request runs.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;
use vidtube_api::{FilePart, ProgressFn, UploadProgress, VideoDraft};

use crate::context::Context;
use crate::error::CoreError;

/// The upload form as filled in by the viewer.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub title: String,
    pub description: String,
    pub video_file: Option<FilePart>,
    pub thumbnail: Option<FilePart>,
}

impl UploadForm {
    /// All four fields are required.
    pub fn validate(self) -> Result<VideoDraft, CoreError> {
        let title = self.title.trim();
        let description = self.description.trim();
        match (self.video_file, self.thumbnail) {
            (Some(video_file), Some(thumbnail))
                if !title.is_empty() && !description.is_empty() =>
            {
                Ok(VideoDraft {
                    title: title.to_owned(),
                    description: description.to_owned(),
                    video_file,
                    thumbnail,
                })
            }
            _ => Err(CoreError::validation("Please fill all fields")),
        }
    }
}

pub struct VideoUpload {
    ctx: Context,
    progress: Arc<watch::Sender<u8>>,
}

impl VideoUpload {
    pub fn new(ctx: &Context) -> Self {
        let (progress, _) = watch::channel(0);
        Self {
            ctx: ctx.clone(),
            progress: Arc::new(progress),
        }
    }

    /// Rounded upload percentage (0-100) of the current or last upload.
    pub fn progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    /// Validate, upload and publish. Returns the new video's id.
    pub async fn submit(&self, form: UploadForm) -> Result<String, CoreError> {
        self.ctx.session().require_identity("upload videos")?;
        let draft = form.validate()?;
        self.progress.send_replace(0);

        let sender = Arc::clone(&self.progress);
        let on_progress: ProgressFn = Arc::new(move |p: UploadProgress| {
            sender.send_if_modified(|current| {
                let percent = p.percent();
                let changed = *current != percent;
                *current = percent;
                changed
            });
        });

        let api = self.ctx.api();
        let video = self
            .ctx
            .call(api.publish_video(&draft, Some(on_progress)))
            .await?;
        self.progress.send_replace(100);
        info!(video_id = %video.id, title = %video.title, "video published");
        Ok(video.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> Option<FilePart> {
        Some(FilePart::new(name, "application/octet-stream", vec![1u8; 4]))
    }

    #[test]
    fn every_field_is_required() {
        let complete = UploadForm {
            title: " Title ".into(),
            description: "About".into(),
            video_file: file("v.mp4"),
            thumbnail: file("t.png"),
        };
        let draft = complete.clone().validate().expect("complete form");
        assert_eq!(draft.title, "Title");

        for form in [
            UploadForm {
                title: "  ".into(),
                ..complete.clone()
            },
            UploadForm {
                description: String::new(),
                ..complete.clone()
            },
            UploadForm {
                video_file: None,
                ..complete.clone()
            },
            UploadForm {
                thumbnail: None,
                ..complete
            },
        ] {
            let err = form.validate().err().map(|e| e.to_string());
            assert_eq!(err.as_deref(), Some("Please fill all fields"));
        }
    }
}
