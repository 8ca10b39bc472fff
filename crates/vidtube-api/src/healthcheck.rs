use crate::client::ApiClient;
use crate::error::Error;

impl ApiClient {
    /// `GET /healthcheck`
    pub async fn healthcheck(&self) -> Result<(), Error> {
        self.http().get("/healthcheck", &[]).await?;
        Ok(())
    }
}
