// Profile page: the signed-in account and its watch history.

use futures_util::future::try_join;
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};
use vidtube_api::{AccountUpdate, FilePart, PasswordChange, User, Video};

use super::required;
use crate::context::Context;
use crate::error::CoreError;
use crate::scope::ViewScope;

pub struct ProfilePage {
    ctx: Context,
    scope: ViewScope,
    user: Option<User>,
    history: Vec<Video>,
}

impl ProfilePage {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            scope: ViewScope::new(),
            user: None,
            history: Vec::new(),
        }
    }

    /// Fetch the account and its watch history together.
    pub async fn load(&mut self) -> Result<&User, CoreError> {
        self.ctx.session().require_identity("view your profile")?;
        let api = self.ctx.api();
        let both = try_join(
            self.ctx.call(api.current_user()),
            self.ctx.call(api.watch_history()),
        );
        match self.scope.run(both).await {
            Ok((user, history)) => {
                self.history = history;
                Ok(&*self.user.insert(user))
            }
            Err(e) => {
                if !e.is_cancelled() {
                    warn!(error = %e, "failed to load profile");
                    self.user = None;
                    self.history.clear();
                }
                Err(e)
            }
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn history(&self) -> &[Video] {
        &self.history
    }

    /// Update name and email, then refresh the session identity.
    pub async fn update_account(&mut self, fullname: &str, email: &str) -> Result<&User, CoreError> {
        self.ctx.session().require_identity("update your account")?;
        let update = AccountUpdate {
            fullname: required("Full name", fullname)?,
            email: required("Email", email)?,
        };
        let api = self.ctx.api();
        self.ctx.call(api.update_account(&update)).await?;
        info!(email = %update.email, "account updated");
        self.refresh().await
    }

    pub async fn change_password(
        &self,
        old_password: SecretString,
        new_password: SecretString,
    ) -> Result<(), CoreError> {
        self.ctx.session().require_identity("change your password")?;
        if new_password.expose_secret().is_empty() {
            return Err(CoreError::validation("New password cannot be empty"));
        }
        let change = PasswordChange {
            old_password,
            new_password,
        };
        let api = self.ctx.api();
        self.ctx.call(api.change_password(&change)).await
    }

    pub async fn update_avatar(&mut self, avatar: &FilePart) -> Result<&User, CoreError> {
        self.ctx.session().require_identity("change your avatar")?;
        let api = self.ctx.api();
        self.ctx.call(api.update_avatar(avatar)).await?;
        self.refresh().await
    }

    pub async fn update_cover_image(&mut self, cover: &FilePart) -> Result<&User, CoreError> {
        self.ctx.session().require_identity("change your cover image")?;
        let api = self.ctx.api();
        self.ctx.call(api.update_cover_image(cover)).await?;
        self.refresh().await
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    async fn refresh(&mut self) -> Result<&User, CoreError> {
        let user = self.ctx.session().refresh_identity().await?;
        Ok(&*self.user.insert(user))
    }
}
