//! Video command handlers.

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;
use vidtube_core::{HomeFeed, ProfilePage, ToggleOutcome, UploadForm, Video, VideoPlayer, VideoUpload};

use crate::cli::{GlobalOpts, VideosArgs, VideosCommand};
use crate::error::CliError;
use crate::output;

use super::{App, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct VideoRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Views")]
    views: u64,
    #[tabled(rename = "Likes")]
    likes: i64,
    #[tabled(rename = "Published")]
    published: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Video> for VideoRow {
    fn from(v: &Video) -> Self {
        Self {
            id: v.id.clone(),
            title: output::truncate(&v.title, 40),
            owner: util::owner_name(v.owner.as_ref()),
            views: v.views,
            likes: v.likes_count,
            published: if v.is_published { "yes" } else { "no" }.into(),
            created: output::date(v.created_at.as_ref()),
        }
    }
}

pub fn print_videos(videos: &[Video], global: &GlobalOpts) {
    let out = output::render_list(&global.output, videos, |v| VideoRow::from(v), |v| v.id.clone());
    output::print_output(&out, global.quiet);
}

fn detail(v: &Video) -> String {
    let mut lines = vec![
        format!("ID:          {}", v.id),
        format!("Title:       {}", v.title),
        format!("Owner:       {}", util::owner_name(v.owner.as_ref())),
        format!("Views:       {}", v.views),
        format!(
            "Likes:       {}{}",
            v.likes_count,
            if v.is_liked { " (you liked this)" } else { "" }
        ),
    ];
    if let Some(duration) = v.duration {
        lines.push(format!("Duration:    {duration:.0}s"));
    }
    if let Some(ref file) = v.video_file {
        lines.push(format!("File:        {file}"));
    }
    lines.push(format!("Created:     {}", output::date(v.created_at.as_ref())));
    if !v.description.is_empty() {
        lines.push(String::new());
        lines.push(v.description.clone());
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(app: &App, args: VideosArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        VideosCommand::List { page } => {
            let mut feed = HomeFeed::new(app.ctx());
            let videos = feed.load_page(page).await?;
            print_videos(videos, global);
            Ok(())
        }

        VideosCommand::Show { id } => {
            app.sign_in_if_configured().await?;
            let mut player = VideoPlayer::new(app.ctx(), id);
            let video = player.load().await?;
            let out = output::render_single(&global.output, video, detail, |v| v.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VideosCommand::Like { id } => {
            app.sign_in("like this").await?;
            let mut player = VideoPlayer::new(app.ctx(), id);
            player.load().await?;
            match player.toggle_like().await? {
                ToggleOutcome::Applied(state) => {
                    let verb = if state.active { "Liked" } else { "Unliked" };
                    let count = state.count.unwrap_or_default();
                    output::success(global, &format!("{verb} ({count} likes)"));
                }
                ToggleOutcome::Ignored => output::notice(global, "A like is already in progress"),
            }
            Ok(())
        }

        VideosCommand::Upload {
            title,
            description,
            file,
            thumbnail,
        } => {
            app.sign_in("upload videos").await?;
            let form = UploadForm {
                title,
                description,
                video_file: Some(util::read_file(&file).await?),
                thumbnail: Some(util::read_file(&thumbnail).await?),
            };
            let upload = VideoUpload::new(app.ctx());
            let bar = progress_bar(global);
            let mut progress = upload.progress();
            let watcher = tokio::spawn({
                let bar = bar.clone();
                async move {
                    while progress.changed().await.is_ok() {
                        let percent = *progress.borrow_and_update();
                        bar.set_position(u64::from(percent));
                    }
                }
            });
            let result = upload.submit(form).await;
            watcher.abort();
            match result {
                Ok(id) => {
                    bar.finish_with_message("uploaded");
                    output::success(global, "Video uploaded successfully");
                    output::print_output(&id, global.quiet);
                    Ok(())
                }
                Err(e) => {
                    bar.abandon_with_message("failed");
                    Err(e.into())
                }
            }
        }

        VideosCommand::Save { id, playlist } => {
            app.sign_in("save videos").await?;
            let mut player = VideoPlayer::new(app.ctx(), id);
            player.load().await?;
            let none_yet = player.load_playlists().await?.is_empty();
            let selection = match playlist {
                Some(n) => n,
                None if none_yet => 1,
                None => pick_playlist(&player)?,
            };
            let saved = player.save_to_playlist(selection).await?;
            output::success(global, &format!("Saved to {}", saved.name));
            Ok(())
        }

        VideosCommand::History => {
            app.sign_in("see your watch history").await?;
            let mut page = ProfilePage::new(app.ctx());
            page.load().await?;
            print_videos(page.history(), global);
            Ok(())
        }

        VideosCommand::Liked => {
            app.sign_in("see your liked videos").await?;
            let ctx = app.ctx();
            let videos = ctx.call(ctx.api().liked_videos()).await?;
            print_videos(&videos, global);
            Ok(())
        }
    }
}

fn pick_playlist(player: &VideoPlayer) -> Result<usize, CliError> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::Validation {
            field: "playlist".into(),
            reason: "pass --playlist <N> when not running interactively".into(),
        });
    }
    let names: Vec<String> = player
        .playlists()
        .iter()
        .map(|p| format!("{} ({} videos)", p.name, p.videos.len()))
        .collect();
    let index = dialoguer::Select::new()
        .with_prompt("Save to playlist")
        .items(&names)
        .default(0)
        .interact()
        .map_err(util::prompt_err)?;
    Ok(index + 1)
}

fn progress_bar(global: &GlobalOpts) -> ProgressBar {
    if global.quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:40}] {pos:>3}% {msg}") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
