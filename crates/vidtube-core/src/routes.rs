// ── Client routes ──
//
// The navigable views and the gate in front of them. Public views render
// for everyone; everything else waits for the session to settle and then
// either renders or redirects to the login view.

use std::fmt;

use crate::session::SessionState;

/// A navigable view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Channel { username: String },
    Video { video_id: String },
    Profile,
    Upload,
    Playlists,
    Playlist { playlist_id: String },
    Tweets,
}

impl Route {
    /// Match a path against the route table. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Self> {
        if !path.starts_with('/') {
            return None;
        }
        let segments: Vec<&str> = path
            .trim_end_matches('/')
            .split('/')
            .skip(1)
            .collect();
        match segments.as_slice() {
            [] => Some(Self::Home),
            ["login"] => Some(Self::Login),
            ["register"] => Some(Self::Register),
            ["channel", username] => Some(Self::Channel {
                username: (*username).to_owned(),
            }),
            ["video", video_id] => Some(Self::Video {
                video_id: (*video_id).to_owned(),
            }),
            ["profile"] => Some(Self::Profile),
            ["upload"] => Some(Self::Upload),
            ["playlist"] => Some(Self::Playlists),
            ["playlist", playlist_id] => Some(Self::Playlist {
                playlist_id: (*playlist_id).to_owned(),
            }),
            ["tweet"] => Some(Self::Tweets),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".into(),
            Self::Login => "/login".into(),
            Self::Register => "/register".into(),
            Self::Channel { username } => format!("/channel/{username}"),
            Self::Video { video_id } => format!("/video/{video_id}"),
            Self::Profile => "/profile".into(),
            Self::Upload => "/upload".into(),
            Self::Playlists => "/playlist".into(),
            Self::Playlist { playlist_id } => format!("/playlist/{playlist_id}"),
            Self::Tweets => "/tweet".into(),
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Self::Login | Self::Register | Self::Channel { .. } | Self::Video { .. }
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// What the shell should do with a requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Route),
    /// The session is still rehydrating; show a placeholder.
    Loading,
    Redirect(Route),
}

/// Gate a path against the current session.
pub fn resolve(path: &str, session: &SessionState) -> RouteDecision {
    let Some(route) = Route::parse(path) else {
        return RouteDecision::Redirect(Route::Home);
    };
    if !route.requires_auth() {
        return RouteDecision::Render(route);
    }
    if session.loading {
        RouteDecision::Loading
    } else if session.is_authenticated() {
        RouteDecision::Render(route)
    } else {
        RouteDecision::Redirect(Route::Login)
    }
}

// ── Navigation ───────────────────────────────────────────────────

/// Receives navigation requests issued by session transitions.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that ignores every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, _route: Route) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionPhase;

    fn state(phase: SessionPhase, loading: bool) -> SessionState {
        SessionState {
            phase,
            identity: None,
            loading,
        }
    }

    #[test]
    fn parse_round_trips_every_route() {
        for route in [
            Route::Home,
            Route::Login,
            Route::Register,
            Route::Channel {
                username: "chef".into(),
            },
            Route::Video {
                video_id: "v1".into(),
            },
            Route::Profile,
            Route::Upload,
            Route::Playlists,
            Route::Playlist {
                playlist_id: "p1".into(),
            },
            Route::Tweets,
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn public_routes_render_while_loading() {
        let loading = state(SessionPhase::Unknown, true);
        assert_eq!(
            resolve("/video/v1", &loading),
            RouteDecision::Render(Route::Video {
                video_id: "v1".into()
            })
        );
        assert_eq!(resolve("/upload", &loading), RouteDecision::Loading);
    }

    #[test]
    fn gated_routes_redirect_anonymous_to_login() {
        let anon = state(SessionPhase::Anonymous, false);
        assert_eq!(
            resolve("/profile", &anon),
            RouteDecision::Redirect(Route::Login)
        );
        assert_eq!(resolve("/", &anon), RouteDecision::Redirect(Route::Login));
    }

    #[test]
    fn unknown_paths_redirect_home() {
        let anon = state(SessionPhase::Anonymous, false);
        assert_eq!(
            resolve("/nowhere/at/all", &anon),
            RouteDecision::Redirect(Route::Home)
        );
        assert_eq!(resolve("relative", &anon), RouteDecision::Redirect(Route::Home));
    }
}
