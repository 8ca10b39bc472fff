//! Comment command handlers.

use tabled::Tabled;
use vidtube_core::{Comment, CommentThread, ToggleOutcome};

use crate::cli::{CommentsArgs, CommentsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{App, util};

#[derive(Tabled)]
struct CommentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Comment")]
    content: String,
    #[tabled(rename = "Likes")]
    likes: String,
    #[tabled(rename = "Posted")]
    posted: String,
}

impl From<&Comment> for CommentRow {
    fn from(c: &Comment) -> Self {
        Self {
            id: c.id.clone(),
            author: util::owner_name(c.owner.as_ref()),
            content: output::truncate(&c.content, 60),
            likes: format!("{}{}", c.likes_count, if c.is_liked { " ♥" } else { "" }),
            posted: output::date(c.created_at.as_ref()),
        }
    }
}

fn print_comments(comments: &[Comment], global: &GlobalOpts) {
    let out = output::render_list(
        &global.output,
        comments,
        |c| CommentRow::from(c),
        |c| c.id.clone(),
    );
    output::print_output(&out, global.quiet);
}

pub async fn handle(app: &App, args: CommentsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut thread = CommentThread::new(app.ctx(), args.video);

    match args.command {
        CommentsCommand::List => {
            app.sign_in_if_configured().await?;
            print_comments(thread.load().await?, global);
            Ok(())
        }

        CommentsCommand::Add { content } => {
            app.sign_in("comment").await?;
            let comment = thread.add(&content).await?;
            output::success(global, &format!("Comment {} added", comment.id));
            Ok(())
        }

        CommentsCommand::Edit { id, content } => {
            app.sign_in("edit comments").await?;
            thread.edit(&id, &content).await?;
            output::success(global, "Comment updated");
            Ok(())
        }

        CommentsCommand::Delete { id } => {
            app.sign_in("delete comments").await?;
            if !util::confirm(&format!("Delete comment '{id}'?"), global.yes)? {
                return Ok(());
            }
            thread.delete(&id).await?;
            output::success(global, "Comment deleted");
            Ok(())
        }

        CommentsCommand::Like { id } => {
            app.sign_in("like this").await?;
            thread.load().await?;
            match thread.toggle_like(&id).await? {
                ToggleOutcome::Applied(state) => {
                    let verb = if state.active { "Liked" } else { "Unliked" };
                    let count = state.count.unwrap_or_default();
                    output::success(global, &format!("{verb} ({count} likes)"));
                }
                ToggleOutcome::Ignored => output::notice(global, "A like is already in progress"),
            }
            Ok(())
        }
    }
}
