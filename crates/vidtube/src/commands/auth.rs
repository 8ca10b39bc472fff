//! Auth command handlers.

use vidtube_core::{Credentials, RegisterForm, User};

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{App, util};

/// Table view of an account.
pub fn detail(user: &User) -> String {
    let mut lines = vec![
        format!("ID:        {}", user.id),
        format!("Username:  {}", user.username),
    ];
    if let Some(ref fullname) = user.fullname {
        lines.push(format!("Full name: {fullname}"));
    }
    if let Some(ref email) = user.email {
        lines.push(format!("Email:     {email}"));
    }
    if let Some(ref avatar) = user.avatar {
        lines.push(format!("Avatar:    {avatar}"));
    }
    if user.created_at.is_some() {
        lines.push(format!(
            "Joined:    {}",
            output::date(user.created_at.as_ref())
        ));
    }
    lines.join("\n")
}

fn print_user(user: &User, global: &GlobalOpts) {
    let out = output::render_single(&global.output, user, detail, |u| u.username.clone());
    output::print_output(&out, global.quiet);
}

pub async fn handle(app: &App, args: AuthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AuthCommand::Login { username, email } => {
            let user = match (username, email) {
                (Some(username), _) => {
                    let password = util::prompt_secret("Password: ")?;
                    app.ctx()
                        .session()
                        .login(&Credentials::username(username, password))
                        .await?
                }
                (None, Some(email)) => {
                    let password = util::prompt_secret("Password: ")?;
                    app.ctx()
                        .session()
                        .login(&Credentials::email(email, password))
                        .await?
                }
                (None, None) => app.sign_in("sign in").await?,
            };
            output::success(global, &format!("Signed in as {}", user.username));
            print_user(&user, global);
            Ok(())
        }

        AuthCommand::Register {
            fullname,
            email,
            username,
            avatar,
            cover_image,
        } => {
            let password = util::prompt_secret("Password: ")?;
            let avatar = match avatar {
                Some(path) => Some(util::read_file(&path).await?),
                None => None,
            };
            let cover_image = match cover_image {
                Some(path) => Some(util::read_file(&path).await?),
                None => None,
            };
            let form = RegisterForm {
                fullname,
                email,
                username,
                password,
                avatar,
                cover_image,
            };
            let user = app.ctx().session().register(&form).await?;
            output::success(global, &format!("Registered {}", user.username));
            print_user(&user, global);
            Ok(())
        }

        AuthCommand::Logout => {
            app.sign_in("sign out").await?;
            app.ctx().session().logout().await;
            output::success(global, "Signed out");
            Ok(())
        }

        AuthCommand::Whoami => {
            app.sign_in("see your account").await?;
            let user = app.ctx().session().require_identity("see your account")?;
            print_user(&user, global);
            Ok(())
        }
    }
}
