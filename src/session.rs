//! Session state management.
//!
//! One shared [`SessionState`] lives behind a signal pair provided through
//! context. Only the operations in this module write to it; components read
//! it or call these operations, never mutate it directly. Durable storage
//! (the token pair in LocalStorage) is kept in lockstep with the in-memory
//! state by the same operations.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiClient, ApiError};
use crate::models::User;
use crate::storage::TokenStore;

/// Where the session currently stands, as seen by the route guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Bootstrap has not finished; make no redirect decision yet.
    Loading,
    /// No access token; protected views must redirect to login.
    Anonymous,
    /// An access token is present.
    Authenticated,
}

/// The one shared piece of authentication state.
///
/// Invariant: `user` and `access_token` are cleared together; a session
/// without an access token never carries a user.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub loading: bool,
    /// Last login/register failure message; cleared when an attempt starts
    /// or succeeds.
    pub error: Option<String>,
}

impl SessionState {
    /// Initial state at application start: loading until bootstrap decides.
    pub fn booting() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Install a fresh login: token pair plus the user it belongs to.
    pub fn apply_login(&mut self, access_token: String, refresh_token: String, user: User) {
        self.access_token = Some(access_token);
        self.refresh_token = Some(refresh_token);
        self.user = Some(user);
        self.error = None;
    }

    /// Drop everything; the session is anonymous afterwards.
    pub fn clear(&mut self) {
        self.user = None;
        self.access_token = None;
        self.refresh_token = None;
        self.error = None;
    }

    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Loading
        } else if self.access_token.is_none() {
            SessionPhase::Anonymous
        } else {
            SessionPhase::Authenticated
        }
    }
}

/// Session context shared through the component tree.
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// Session state (read side).
    pub state: ReadSignal<SessionState>,
    /// Session state (write side). Reserved for the operations below.
    set_state: WriteSignal<SessionState>,
    /// Origin captured by the route guard, consumed by the login page.
    pub return_to: RwSignal<Option<String>>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::booting());
        Self {
            state,
            set_state,
            return_to: RwSignal::new(None),
        }
    }

    /// Derived phase signal for the route guard.
    pub fn phase(&self) -> Signal<SessionPhase> {
        let state = self.state;
        Signal::derive(move || state.with(SessionState::phase))
    }

    pub fn user(&self) -> Signal<Option<User>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.clone()))
    }

    pub fn has_token(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.access_token.is_some()))
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Grab the session context; the root component always provides it.
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

/// Bootstrap the session from durable storage.
///
/// No stored access token means an anonymous start. A stored token is
/// installed optimistically, then checked with a profile fetch; a stale or
/// revoked token clears the whole session. The loading flag drops once the
/// outcome is known, and only then does the route guard start redirecting.
pub fn init_session(ctx: SessionContext, api: ApiClient) {
    let (access, refresh) = TokenStore::load();
    let Some(access) = access else {
        ctx.set_state.update(|s| s.loading = false);
        return;
    };

    ctx.set_state.update(|s| {
        s.access_token = Some(access);
        s.refresh_token = refresh;
    });

    spawn_local(async move {
        // A failure here already cleared the session; the token was stale.
        let _ = refresh_profile(ctx, &api).await;
        ctx.set_state.update(|s| s.loading = false);
    });
}

/// Exchange credentials for a session. Tokens and user land in memory and
/// durable storage before the secondary profile fetch runs; that fetch only
/// picks up fields the login payload lacks (verification status) and its
/// failure is logged, never surfaced, and never undoes the login.
pub async fn login(
    ctx: SessionContext,
    api: &ApiClient,
    email: &str,
    password: &str,
) -> Result<User, ApiError> {
    ctx.set_state.update(|s| s.error = None);
    let auth = match api.login(email, password).await {
        Ok(auth) => auth,
        Err(err) => {
            let message = err.display_message("Login failed. Please try again.");
            ctx.set_state.update(|s| s.error = Some(message));
            return Err(err);
        }
    };

    TokenStore::store(&auth.token, &auth.refresh_token);
    ctx.set_state.update(|s| {
        s.apply_login(auth.token.clone(), auth.refresh_token.clone(), auth.user.clone())
    });

    match api.get_profile().await {
        Ok(user) => ctx.set_state.update(|s| s.user = Some(user)),
        Err(err) => leptos::logging::error!("profile refresh after login failed: {err}"),
    }

    Ok(auth.user)
}

/// Create an account. No tokens come back; the caller sends the user to the
/// email-verification step.
pub async fn register(
    ctx: SessionContext,
    api: &ApiClient,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, ApiError> {
    ctx.set_state.update(|s| s.error = None);
    match api.register(name, email, password).await {
        Ok(user) => Ok(user),
        Err(err) => {
            let message = err.display_message("Registration failed. Please try again.");
            ctx.set_state.update(|s| s.error = Some(message));
            Err(err)
        }
    }
}

/// Log out. The server call is best-effort: whatever it does, local state
/// and durable storage always end up empty.
pub async fn logout(ctx: SessionContext, api: &ApiClient) {
    if let Some(refresh) = TokenStore::refresh_token() {
        if let Err(err) = api.logout(&refresh).await {
            leptos::logging::error!("server logout failed: {err}");
        }
    }
    clear_session(ctx);
}

/// Fetch the current profile and replace the in-memory user. Any failure is
/// treated as session invalidation: clear everything and re-raise.
pub async fn refresh_profile(ctx: SessionContext, api: &ApiClient) -> Result<User, ApiError> {
    match api.get_profile().await {
        Ok(user) => {
            ctx.set_state.update(|s| {
                s.user = Some(user.clone());
                s.error = None;
            });
            Ok(user)
        }
        Err(err) => {
            clear_session(ctx);
            Err(err)
        }
    }
}

/// Replace the in-memory user after a profile update. Kept here so every
/// writer of session state lives in this module.
pub fn set_user(ctx: SessionContext, user: User) {
    ctx.set_state.update(|s| s.user = Some(user));
}

fn clear_session(ctx: SessionContext) {
    TokenStore::clear();
    ctx.set_state.update(SessionState::clear);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: 1,
            name: "Jane".into(),
            email: "jane@x.com".into(),
            email_verified: false,
            created_at: None,
        }
    }

    #[test]
    fn booting_state_is_loading_and_empty() {
        let state = SessionState::booting();
        assert_eq!(state.phase(), SessionPhase::Loading);
        assert!(state.user.is_none());
        assert!(state.access_token.is_none());
    }

    #[test]
    fn apply_login_sets_tokens_and_user() {
        let mut state = SessionState::default();
        state.apply_login("acc".into(), "ref".into(), test_user());
        assert_eq!(state.access_token.as_deref(), Some("acc"));
        assert_eq!(state.refresh_token.as_deref(), Some("ref"));
        assert!(state.user.is_some());
        assert_eq!(state.phase(), SessionPhase::Authenticated);
    }

    #[test]
    fn clear_empties_every_field() {
        let mut state = SessionState::default();
        state.apply_login("acc".into(), "ref".into(), test_user());
        state.error = Some("boom".into());
        state.clear();
        assert_eq!(state, SessionState::default());
        assert_eq!(state.phase(), SessionPhase::Anonymous);
    }

    #[test]
    fn phase_covers_all_three_states() {
        assert_eq!(SessionState::booting().phase(), SessionPhase::Loading);
        assert_eq!(SessionState::default().phase(), SessionPhase::Anonymous);

        let mut authed = SessionState::default();
        authed.apply_login("acc".into(), "ref".into(), test_user());
        assert_eq!(authed.phase(), SessionPhase::Authenticated);

        // While still loading, a present token must not flip the phase;
        // the guard may not redirect before bootstrap settles.
        let mut loading_with_token = SessionState::booting();
        loading_with_token.access_token = Some("acc".into());
        assert_eq!(loading_with_token.phase(), SessionPhase::Loading);
    }

    #[test]
    fn failure_message_is_kept_until_the_next_attempt_succeeds() {
        let mut state = SessionState::default();
        state.error = Some("Invalid credentials".into());
        // A recorded failure does not change the phase.
        assert_eq!(state.phase(), SessionPhase::Anonymous);

        state.apply_login("acc".into(), "ref".into(), test_user());
        assert!(state.error.is_none());
    }

    #[test]
    fn no_token_implies_no_user() {
        // The only transitions that install a user also install a token;
        // the only transition that removes the token removes the user.
        let mut state = SessionState::default();
        state.apply_login("acc".into(), "ref".into(), test_user());
        state.clear();
        assert!(state.access_token.is_none());
        assert!(state.user.is_none());
    }
}
