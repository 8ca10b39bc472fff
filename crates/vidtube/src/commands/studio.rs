//! Channel studio command handlers.

use vidtube_core::{ChannelStats, ChannelStudio, ToggleOutcome};

use crate::cli::{GlobalOpts, StudioArgs, StudioCommand};
use crate::error::CliError;
use crate::output;

use super::{App, util, videos};

fn stats_detail(s: &ChannelStats) -> String {
    [
        format!("Videos:      {}", s.total_videos),
        format!("Views:       {}", s.total_views),
        format!("Subscribers: {}", s.total_subscribers),
        format!("Likes:       {}", s.total_likes),
    ]
    .join("\n")
}

pub async fn handle(app: &App, args: StudioArgs, global: &GlobalOpts) -> Result<(), CliError> {
    app.sign_in("open your studio").await?;
    let mut studio = ChannelStudio::new(app.ctx());

    match args.command {
        StudioCommand::Stats => {
            studio.load().await?;
            let out = output::render_single(&global.output, studio.stats(), stats_detail, |s| {
                s.total_videos.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StudioCommand::Videos => {
            videos::print_videos(studio.reload_videos().await?, global);
            Ok(())
        }

        StudioCommand::Edit {
            id,
            title,
            description,
            thumbnail,
        } => {
            let thumbnail = match thumbnail {
                Some(path) => Some(util::read_file(&path).await?),
                None => None,
            };
            studio
                .update_video(&id, &title, &description, thumbnail)
                .await?;
            output::success(global, "Video updated");
            Ok(())
        }

        StudioCommand::Publish { id } => {
            studio.reload_videos().await?;
            match studio.toggle_publish(&id).await? {
                ToggleOutcome::Applied(state) => {
                    let status = if state.active { "published" } else { "unpublished" };
                    output::success(global, &format!("Video {status}"));
                }
                ToggleOutcome::Ignored => {
                    output::notice(global, "A publish change is already in progress");
                }
            }
            Ok(())
        }

        StudioCommand::Delete { id } => {
            if !util::confirm(&format!("Delete video '{id}'? This cannot be undone."), global.yes)? {
                return Ok(());
            }
            studio.delete_video(&id).await?;
            output::success(global, "Video deleted");
            Ok(())
        }
    }
}
