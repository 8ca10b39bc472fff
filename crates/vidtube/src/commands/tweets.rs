//! Tweet command handlers.

use tabled::Tabled;
use vidtube_core::{ToggleOutcome, Tweet, TweetFeed};

use crate::cli::{GlobalOpts, TweetsArgs, TweetsCommand};
use crate::error::CliError;
use crate::output;

use super::{App, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct TweetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Content")]
    content: String,
    #[tabled(rename = "Likes")]
    likes: String,
    #[tabled(rename = "Posted")]
    posted: String,
}

impl From<&Tweet> for TweetRow {
    fn from(t: &Tweet) -> Self {
        Self {
            id: t.id.clone(),
            author: util::owner_name(t.owner.as_ref()),
            content: output::truncate(&t.content, 60),
            likes: format!("{}{}", t.likes_count, if t.is_liked { " ♥" } else { "" }),
            posted: output::date(t.created_at.as_ref()),
        }
    }
}

pub fn print_tweets(tweets: &[Tweet], global: &GlobalOpts) {
    let out = output::render_list(&global.output, tweets, |t| TweetRow::from(t), |t| t.id.clone());
    output::print_output(&out, global.quiet);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(app: &App, args: TweetsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    app.sign_in("view your tweets").await?;
    let mut feed = TweetFeed::new(app.ctx());

    match args.command {
        TweetsCommand::List => {
            print_tweets(feed.load().await?, global);
            Ok(())
        }

        TweetsCommand::Post { content } => {
            let tweets = feed.post(&content).await?;
            output::success(global, "Posted");
            print_tweets(tweets, global);
            Ok(())
        }

        TweetsCommand::Edit { id, content } => {
            let tweets = feed.edit(&id, &content).await?;
            output::success(global, "Tweet updated");
            print_tweets(tweets, global);
            Ok(())
        }

        TweetsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete tweet '{id}'?"), global.yes)? {
                return Ok(());
            }
            let tweets = feed.delete(&id).await?;
            output::success(global, "Tweet deleted");
            print_tweets(tweets, global);
            Ok(())
        }

        TweetsCommand::Like { id } => {
            feed.load().await?;
            match feed.toggle_like(&id).await? {
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
