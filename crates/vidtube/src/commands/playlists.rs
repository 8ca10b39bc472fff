//! Playlist command handlers.

use tabled::Tabled;
use vidtube_core::{Playlist, PlaylistDetail, PlaylistLibrary};

use crate::cli::{GlobalOpts, OutputFormat, PlaylistsArgs, PlaylistsCommand};
use crate::error::CliError;
use crate::output;

use super::{App, util, videos};

#[derive(Tabled)]
struct PlaylistRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Videos")]
    videos: usize,
    #[tabled(rename = "Description")]
    description: String,
}

/// The `#` column is the 1-based number `videos save --playlist` takes.
fn print_playlists(playlists: &[Playlist], global: &GlobalOpts) {
    let to_row = |p: &Playlist| PlaylistRow {
        index: playlists
            .iter()
            .position(|q| std::ptr::eq(q, p))
            .map_or(0, |i| i + 1),
        id: p.id.clone(),
        name: p.name.clone(),
        videos: p.videos.len(),
        description: output::truncate(&p.description, 40),
    };
    let out = output::render_list(&global.output, playlists, to_row, |p| p.id.clone());
    output::print_output(&out, global.quiet);
}

pub async fn handle(app: &App, args: PlaylistsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        PlaylistsCommand::List => {
            app.sign_in("view your playlists").await?;
            let mut library = PlaylistLibrary::new(app.ctx());
            print_playlists(library.load().await?, global);
            Ok(())
        }

        PlaylistsCommand::Show { id } => {
            app.sign_in_if_configured().await?;
            let mut detail = PlaylistDetail::new(app.ctx(), id);
            detail.load().await?;
            if let (OutputFormat::Table, Some(playlist)) = (&global.output, detail.playlist()) {
                let mut header = playlist.name.clone();
                if !playlist.description.is_empty() {
                    header.push('\n');
                    header.push_str(&playlist.description);
                }
                output::print_output(&header, global.quiet);
            }
            videos::print_videos(detail.videos(), global);
            Ok(())
        }

        PlaylistsCommand::Create { name, description } => {
            app.sign_in("create playlists").await?;
            let mut library = PlaylistLibrary::new(app.ctx());
            let playlist = library.create(&name, &description).await?;
            output::success(global, &format!("Playlist '{}' created", playlist.name));
            output::print_output(&playlist.id, global.quiet);
            Ok(())
        }

        PlaylistsCommand::Rename {
            id,
            name,
            description,
        } => {
            app.sign_in("edit playlists").await?;
            let mut library = PlaylistLibrary::new(app.ctx());
            library.rename(&id, &name, &description).await?;
            output::success(global, "Playlist updated");
            Ok(())
        }

        PlaylistsCommand::Delete { id } => {
            app.sign_in("delete playlists").await?;
            if !util::confirm(&format!("Delete playlist '{id}'?"), global.yes)? {
                return Ok(());
            }
            let mut library = PlaylistLibrary::new(app.ctx());
            library.delete(&id).await?;
            output::success(global, "Playlist deleted");
            Ok(())
        }

        PlaylistsCommand::Remove { id, video } => {
            app.sign_in("edit playlists").await?;
            let mut detail = PlaylistDetail::new(app.ctx(), id);
            detail.remove_video(&video).await?;
            output::success(global, "Video removed from playlist");
            Ok(())
        }
    }
}
