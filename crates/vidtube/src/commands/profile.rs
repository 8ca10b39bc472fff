//! Profile command handlers.

use vidtube_core::ProfilePage;

use crate::cli::{GlobalOpts, ProfileArgs, ProfileCommand};
use crate::error::CliError;
use crate::output;

use super::{App, auth, util, videos};

pub async fn handle(app: &App, args: ProfileArgs, global: &GlobalOpts) -> Result<(), CliError> {
    app.sign_in("see your profile").await?;
    let mut page = ProfilePage::new(app.ctx());

    match args.command {
        ProfileCommand::Show => {
            let user = page.load().await?;
            let out = output::render_single(&global.output, user, auth::detail, |u| u.id.clone());
            output::print_output(&out, global.quiet);
            if !page.history().is_empty() && matches!(global.output, crate::cli::OutputFormat::Table) {
                output::print_output("\nWatch history", global.quiet);
                videos::print_videos(page.history(), global);
            }
            Ok(())
        }

        ProfileCommand::Update { fullname, email } => {
            let user = page.update_account(&fullname, &email).await?;
            output::success(global, &format!("Account updated for {}", user.username));
            Ok(())
        }

        ProfileCommand::Password => {
            let old_password = util::prompt_secret("Current password: ")?;
            let new_password = util::prompt_secret("New password: ")?;
            page.change_password(old_password, new_password).await?;
            output::success(global, "Password changed");
            Ok(())
        }

        ProfileCommand::Avatar { file } => {
            let avatar = util::read_file(&file).await?;
            page.update_avatar(&avatar).await?;
            output::success(global, "Avatar updated");
            Ok(())
        }

        ProfileCommand::Cover { file } => {
            let cover = util::read_file(&file).await?;
            page.update_cover_image(&cover).await?;
            output::success(global, "Cover image updated");
            Ok(())
        }
    }
}
