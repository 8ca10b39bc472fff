//! Channel and subscription command handlers.

use serde::Serialize;
use tabled::Tabled;
use vidtube_api::Subscription;
use vidtube_core::{ChannelPage, ChannelProfile, ToggleOutcome, Tweet};

use crate::cli::{ChannelArgs, ChannelCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{App, tweets, util, videos};

#[derive(Serialize)]
struct ChannelView<'a> {
    #[serde(flatten)]
    profile: &'a ChannelProfile,
    tweets: &'a [Tweet],
}

#[derive(Tabled)]
struct SubscriptionRow {
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Channel ID")]
    channel_id: String,
}

impl From<&Subscription> for SubscriptionRow {
    fn from(s: &Subscription) -> Self {
        Self {
            channel: util::owner_name(s.channel.as_ref()),
            channel_id: s.channel.as_ref().map(|c| c.id().to_owned()).unwrap_or_default(),
        }
    }
}

fn header(p: &ChannelProfile) -> String {
    let mut lines = vec![format!(
        "{} (@{})",
        p.fullname.as_deref().unwrap_or(&p.username),
        p.username
    )];
    lines.push(format!(
        "{} subscribers · {} subscriptions{}",
        p.subscribers_count,
        p.channels_subscribed_to_count,
        if p.is_subscribed { " · subscribed" } else { "" }
    ));
    if let Some(ref description) = p.description {
        lines.push(description.clone());
    }
    lines.join("\n")
}

pub async fn handle(app: &App, args: ChannelArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ChannelCommand::Show { username } => {
            app.sign_in_if_configured().await?;
            let mut page = ChannelPage::new(app.ctx(), username);
            page.load().await?;
            let Some(profile) = page.profile() else {
                return Ok(());
            };
            match global.output {
                crate::cli::OutputFormat::Table => {
                    output::print_output(&header(profile), global.quiet);
                    videos::print_videos(page.videos(), global);
                    if !page.tweets().is_empty() {
                        tweets::print_tweets(page.tweets(), global);
                    }
                }
                _ => {
                    let view = ChannelView {
                        profile,
                        tweets: page.tweets(),
                    };
                    let out = output::render_single(&global.output, &view, |_| String::new(), |v| {
                        v.profile.id.clone()
                    });
                    output::print_output(&out, global.quiet);
                }
            }
            Ok(())
        }

        ChannelCommand::Subscribe { username } => {
            app.sign_in("subscribe").await?;
            let mut page = ChannelPage::new(app.ctx(), username);
            page.load().await?;
            match page.toggle_subscription().await? {
                ToggleOutcome::Applied(state) => {
                    let verb = if state.active { "Subscribed" } else { "Unsubscribed" };
                    let count = state.count.unwrap_or_default();
                    output::success(global, &format!("{verb} ({count} subscribers)"));
                }
                ToggleOutcome::Ignored => {
                    output::notice(global, "A subscription change is already in progress");
                }
            }
            Ok(())
        }
    }
}

pub async fn subscriptions(app: &App, global: &GlobalOpts) -> Result<(), CliError> {
    app.sign_in("see your subscriptions").await?;
    let ctx = app.ctx();
    let subs = ctx.call(ctx.api().subscribed_channels()).await?;
    let out = output::render_list(
        &global.output,
        &subs,
        |s| SubscriptionRow::from(s),
        |s| util::owner_name(s.channel.as_ref()),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
