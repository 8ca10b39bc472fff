// Home feed: the first page of published videos.

use tracing::warn;
use vidtube_api::{Video, VideoQuery};

use crate::context::Context;
use crate::error::CoreError;
use crate::scope::ViewScope;

const FEED_PAGE: u32 = 1;
const FEED_LIMIT: u32 = 10;

pub struct HomeFeed {
    ctx: Context,
    scope: ViewScope,
    videos: Vec<Video>,
    page: u32,
    total_pages: Option<u32>,
}

impl HomeFeed {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            scope: ViewScope::new(),
            videos: Vec::new(),
            page: FEED_PAGE,
            total_pages: None,
        }
    }

    /// Fetch the first page (`page=1&limit=10`).
    pub async fn load(&mut self) -> Result<&[Video], CoreError> {
        self.load_page(FEED_PAGE).await
    }

    /// Fetch an arbitrary page of the feed.
    pub async fn load_page(&mut self, page: u32) -> Result<&[Video], CoreError> {
        let query = VideoQuery::page(page, FEED_LIMIT);
        let api = self.ctx.api();
        match self.scope.run(self.ctx.call(api.list_videos(&query))).await {
            Ok(feed) => {
                self.videos = feed.videos;
                self.page = page;
                self.total_pages = feed.total_pages;
                Ok(&self.videos)
            }
            Err(e) => {
                if !e.is_cancelled() {
                    warn!(error = %e, page, "failed to load video feed");
                    self.videos.clear();
                }
                Err(e)
            }
        }
    }

    /// Advance to the next page when the backend reports more.
    pub async fn next_page(&mut self) -> Result<&[Video], CoreError> {
        if self.total_pages.is_some_and(|total| self.page >= total) {
            return Ok(&self.videos);
        }
        self.load_page(self.page + 1).await
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }
}
