// User endpoints
//
// Session lifecycle (register/login/logout), account maintenance, and
// public channel profiles. Login and register set the HTTP-only session
// cookie in the client's jar; logout clears it server-side.

use reqwest::multipart::Form;
use secrecy::ExposeSecret;
use tracing::debug;

use crate::client::{ApiClient, segment};
use crate::envelope;
use crate::error::Error;
use crate::models::{
    AccountUpdate, ChannelProfile, Credentials, PasswordChange, RegisterForm, User, Video,
};
use crate::upload::{FilePart, file_part};

impl ApiClient {
    /// Create an account.
    ///
    /// `POST /users/register` (multipart: fullName, email, username,
    /// password, optional avatar and coverImage)
    pub async fn register(&self, form: &RegisterForm) -> Result<User, Error> {
        debug!(username = %form.username, "registering user");
        let mut multipart = Form::new()
            .text("fullName", form.fullname.clone())
            .text("email", form.email.clone())
            .text("username", form.username.clone())
            .text("password", form.password.expose_secret().to_owned());
        if let Some(ref avatar) = form.avatar {
            multipart = multipart.part("avatar", file_part(avatar, None)?);
        }
        if let Some(ref cover) = form.cover_image {
            multipart = multipart.part("coverImage", file_part(cover, None)?);
        }
        let resp = self.http().post_multipart("/users/register", multipart).await?;
        envelope::identity(&resp)
    }

    /// Authenticate and start a cookie session.
    ///
    /// `POST /users/login`: the identity is nested under `data.user`.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, Error> {
        debug!(
            username = credentials.username.as_deref(),
            email = credentials.email.as_deref(),
            "logging in"
        );
        let resp = self
            .http()
            .post_json("/users/login", &credentials.to_json())
            .await?;
        envelope::identity(&resp)
    }

    /// End the current session.
    ///
    /// `POST /users/logout`
    pub async fn logout(&self) -> Result<(), Error> {
        debug!("logging out");
        self.http().post("/users/logout").await?;
        Ok(())
    }

    /// Rotate the access token cookie using the refresh token cookie.
    ///
    /// `POST /users/refreshToken`
    pub async fn refresh_access_token(&self) -> Result<(), Error> {
        debug!("refreshing access token");
        self.http().post("/users/refreshToken").await?;
        Ok(())
    }

    /// `POST /users/change-password`
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), Error> {
        debug!("changing password");
        self.http()
            .post_json("/users/change-password", &change.to_json())
            .await?;
        Ok(())
    }

    /// Fetch the identity bound to the session cookie.
    ///
    /// `GET /users/current-user`
    pub async fn current_user(&self) -> Result<User, Error> {
        let resp = self.http().get("/users/current-user", &[]).await?;
        envelope::data(&resp)
    }

    /// `PATCH /users/update-account`
    pub async fn update_account(&self, update: &AccountUpdate) -> Result<User, Error> {
        debug!(email = %update.email, "updating account details");
        let resp = self
            .http()
            .patch_json("/users/update-account", update)
            .await?;
        envelope::data(&resp)
    }

    /// `PATCH /users/avatar` (multipart: avatar)
    pub async fn update_avatar(&self, avatar: &FilePart) -> Result<User, Error> {
        debug!(file = %avatar.file_name, "updating avatar");
        let form = Form::new().part("avatar", file_part(avatar, None)?);
        let resp = self.http().patch_multipart("/users/avatar", form).await?;
        envelope::data(&resp)
    }

    /// `PATCH /users/cover-image` (multipart: coverImage)
    pub async fn update_cover_image(&self, cover: &FilePart) -> Result<User, Error> {
        debug!(file = %cover.file_name, "updating cover image");
        let form = Form::new().part("coverImage", file_part(cover, None)?);
        let resp = self.http().patch_multipart("/users/cover-image", form).await?;
        envelope::data(&resp)
    }

    /// Public channel page, including subscriber counts and videos.
    ///
    /// `GET /users/c/{username}`
    pub async fn channel_profile(&self, username: &str) -> Result<ChannelProfile, Error> {
        let resp = self
            .http()
            .get(&format!("/users/c/{}", segment(username)), &[])
            .await?;
        envelope::data(&resp)
    }

    /// `GET /users/history`
    pub async fn watch_history(&self) -> Result<Vec<Video>, Error> {
        let resp = self.http().get("/users/history", &[]).await?;
        Ok(envelope::list_or_empty(&resp))
    }
}
