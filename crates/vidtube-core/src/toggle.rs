// ── Optimistic toggles ──
//
// Boolean-plus-counter flips (like, subscribe, publish) that are applied
// locally once the backend confirms. One generic control carries the
// guard logic; the concrete toggles only supply the remote call and the
// reconciliation policy.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::debug;
use vidtube_api::{ChannelProfile, Comment, LikeTarget, ToggleReceipt, Tweet, Video};

use crate::context::Context;
use crate::error::CoreError;
use crate::session::Session;

// ── State ────────────────────────────────────────────────────────

/// How a confirmed toggle derives its new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// Flip the pre-call boolean; the counter moves by one away from it.
    LocalNegation,
    /// Take the server's boolean when the reply carries one, otherwise
    /// flip. The counter goes up when the new value is on, down otherwise.
    PreferServer,
}

/// The locally displayed state of one toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleState {
    pub active: bool,
    /// Absent for toggles without a counter (publish status).
    pub count: Option<i64>,
}

impl ToggleState {
    pub fn new(active: bool, count: Option<i64>) -> Self {
        Self { active, count }
    }

    /// The state after a confirmed toggle. The counter is not clamped.
    pub fn settle(self, policy: Reconcile, server: Option<bool>) -> Self {
        let (active, delta) = match policy {
            Reconcile::LocalNegation => (!self.active, if self.active { -1 } else { 1 }),
            Reconcile::PreferServer => {
                let active = server.unwrap_or(!self.active);
                (active, if active { 1 } else { -1 })
            }
        };
        Self {
            active,
            count: self.count.map(|c| c + delta),
        }
    }
}

/// Result of triggering a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The backend confirmed; this is the new local state.
    Applied(ToggleState),
    /// Another toggle for the same control was still in flight.
    Ignored,
}

// ── ToggleControl ────────────────────────────────────────────────

/// Guarded optimistic toggle.
///
/// At most one remote call is in flight per control. Failures leave the
/// state as it was and hand the error back for the caller to report.
pub struct ToggleControl {
    session: Session,
    action: &'static str,
    policy: Reconcile,
    state: Mutex<ToggleState>,
    pending: AtomicBool,
}

struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ToggleControl {
    /// `action` completes the sentence "Please log in to ...".
    pub fn new(
        session: Session,
        action: &'static str,
        policy: Reconcile,
        initial: ToggleState,
    ) -> Self {
        Self {
            session,
            action,
            policy,
            state: Mutex::new(initial),
            pending: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> ToggleState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    pub fn policy(&self) -> Reconcile {
        self.policy
    }

    /// Re-derive from a freshly fetched snapshot.
    pub fn sync(&self, state: ToggleState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Run `request` and apply the confirmed result.
    pub async fn trigger<F, Fut>(&self, request: F) -> Result<ToggleOutcome, CoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ToggleReceipt, CoreError>>,
    {
        if !self.session.is_authenticated() {
            return Err(CoreError::Unauthenticated {
                action: self.action.to_owned(),
            });
        }
        if self
            .pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(action = self.action, "toggle already in flight, ignoring");
            return Ok(ToggleOutcome::Ignored);
        }
        let _guard = PendingGuard(&self.pending);

        let before = self.state();
        let receipt = request().await?;
        let after = before.settle(self.policy, receipt.state);
        self.sync(after);
        debug!(action = self.action, ?before, ?after, "toggle applied");
        Ok(ToggleOutcome::Applied(after))
    }
}

// ── Like ─────────────────────────────────────────────────────────

/// Like/unlike a video, comment or tweet.
pub struct LikeToggle {
    ctx: Context,
    target: LikeTarget,
    id: String,
    control: ToggleControl,
}

impl LikeToggle {
    pub fn new(
        ctx: &Context,
        target: LikeTarget,
        id: impl Into<String>,
        liked: bool,
        likes: i64,
    ) -> Self {
        Self {
            ctx: ctx.clone(),
            target,
            id: id.into(),
            control: ToggleControl::new(
                ctx.session().clone(),
                "like this",
                Reconcile::LocalNegation,
                ToggleState::new(liked, Some(likes)),
            ),
        }
    }

    pub fn for_video(ctx: &Context, video: &Video) -> Self {
        Self::new(ctx, LikeTarget::Video, &video.id, video.is_liked, video.likes_count)
    }

    pub fn for_comment(ctx: &Context, comment: &Comment) -> Self {
        Self::new(
            ctx,
            LikeTarget::Comment,
            &comment.id,
            comment.is_liked,
            comment.likes_count,
        )
    }

    pub fn for_tweet(ctx: &Context, tweet: &Tweet) -> Self {
        Self::new(ctx, LikeTarget::Tweet, &tweet.id, tweet.is_liked, tweet.likes_count)
    }

    pub async fn toggle(&self) -> Result<ToggleOutcome, CoreError> {
        let api = self.ctx.api();
        self.control
            .trigger(|| self.ctx.call(api.toggle_like(self.target, &self.id)))
            .await
    }

    pub fn sync(&self, liked: bool, likes: i64) {
        self.control.sync(ToggleState::new(liked, Some(likes)));
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn target(&self) -> LikeTarget {
        self.target
    }

    pub fn state(&self) -> ToggleState {
        self.control.state()
    }

    pub fn is_pending(&self) -> bool {
        self.control.is_pending()
    }
}

// ── Subscribe ────────────────────────────────────────────────────

/// Subscribe to or unsubscribe from a channel, addressed by username.
pub struct SubscribeToggle {
    ctx: Context,
    channel: String,
    control: ToggleControl,
}

impl SubscribeToggle {
    pub fn new(
        ctx: &Context,
        channel: impl Into<String>,
        subscribed: bool,
        subscribers: i64,
    ) -> Self {
        Self {
            ctx: ctx.clone(),
            channel: channel.into(),
            control: ToggleControl::new(
                ctx.session().clone(),
                "subscribe",
                Reconcile::PreferServer,
                ToggleState::new(subscribed, Some(subscribers)),
            ),
        }
    }

    pub fn for_channel(ctx: &Context, profile: &ChannelProfile) -> Self {
        Self::new(
            ctx,
            &profile.username,
            profile.is_subscribed,
            profile.subscribers_count,
        )
    }

    pub async fn toggle(&self) -> Result<ToggleOutcome, CoreError> {
        let api = self.ctx.api();
        self.control
            .trigger(|| self.ctx.call(api.toggle_subscription(&self.channel)))
            .await
    }

    pub fn sync(&self, subscribed: bool, subscribers: i64) {
        self.control
            .sync(ToggleState::new(subscribed, Some(subscribers)));
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn state(&self) -> ToggleState {
        self.control.state()
    }

    pub fn is_pending(&self) -> bool {
        self.control.is_pending()
    }
}

// ── Publish ──────────────────────────────────────────────────────

/// Flip a video between published and draft. No counter.
pub struct PublishToggle {
    ctx: Context,
    video_id: String,
    control: ToggleControl,
}

impl PublishToggle {
    pub fn new(ctx: &Context, video_id: impl Into<String>, published: bool) -> Self {
        Self {
            ctx: ctx.clone(),
            video_id: video_id.into(),
            control: ToggleControl::new(
                ctx.session().clone(),
                "change publish status",
                Reconcile::LocalNegation,
                ToggleState::new(published, None),
            ),
        }
    }

    pub fn for_video(ctx: &Context, video: &Video) -> Self {
        Self::new(ctx, &video.id, video.is_published)
    }

    pub async fn toggle(&self) -> Result<ToggleOutcome, CoreError> {
        let api = self.ctx.api();
        self.control
            .trigger(|| self.ctx.call(api.toggle_publish_status(&self.video_id)))
            .await
    }

    pub fn sync(&self, published: bool) {
        self.control.sync(ToggleState::new(published, None));
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn state(&self) -> ToggleState {
        self.control.state()
    }

    pub fn is_pending(&self) -> bool {
        self.control.is_pending()
    }
}
