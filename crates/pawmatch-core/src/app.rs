//! View navigation
//!
//! `App` is the top-level state machine: it starts on the login view, builds a
//! fresh `SearchSession` when the user gets in, and drops it again on logout or
//! when the service reports the session as expired.

use std::sync::Arc;

use pawmatch_client::DogApi;
use tracing::{debug, info};

use crate::auth::{self, Credentials, LoginOutcome};
use crate::notification::Notification;
use crate::session::{MatchOutcome, PageDirection, SearchOutcome, SearchSession};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Login,
    Search,
}

pub struct App {
    api: Arc<dyn DogApi>,
    view: View,
    session: Option<SearchSession>,
    notifications: Vec<Notification>,
}

impl App {
    pub fn new(api: Arc<dyn DogApi>) -> Self {
        Self {
            api,
            view: View::Login,
            session: None,
            notifications: Vec::new(),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Session of the search view; `None` on the login view
    pub fn session(&self) -> Option<&SearchSession> {
        self.session.as_ref()
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Take all notifications raised since the last call
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Submit the login form
    pub async fn login(&mut self, name: &str, email: &str) -> LoginOutcome {
        let credentials = match Credentials::new(name, email) {
            Ok(credentials) => credentials,
            Err(e) => {
                debug!("Rejected login form: {}", e);
                self.notify(Notification::login_failed());
                return LoginOutcome::Rejected;
            }
        };

        let outcome = auth::login(self.api.as_ref(), &credentials).await;
        match outcome {
            LoginOutcome::LoggedIn => {
                self.notify(Notification::welcome());
                self.enter_search().await;
            }
            LoginOutcome::Rejected => self.notify(Notification::login_failed()),
        }
        outcome
    }

    /// Navigate to the search view with a fresh session
    async fn enter_search(&mut self) {
        info!("Entering search view");
        self.view = View::Search;
        let session = self.session.insert(SearchSession::new(self.api.clone()));
        let (breeds, outcome) = session.activate().await;
        if let Some(notification) = breeds {
            self.notify(notification);
        }
        self.settle_search(outcome);
    }

    fn leave_search(&mut self) {
        info!("Returning to login view");
        self.session = None;
        self.view = View::Login;
    }

    /// Apply navigation and notifications a search outcome implies
    fn settle_search(&mut self, outcome: SearchOutcome) -> SearchOutcome {
        match &outcome {
            SearchOutcome::SessionExpired => self.leave_search(),
            SearchOutcome::Failed(notification) => self.notify(notification.clone()),
            _ => {}
        }
        outcome
    }

    /// Re-run the search from the first page. `None` outside the search view.
    pub async fn search(&mut self) -> Option<SearchOutcome> {
        let outcome = self.session.as_ref()?.search().await;
        Some(self.settle_search(outcome))
    }

    pub async fn turn_page(&mut self, direction: PageDirection) -> Option<SearchOutcome> {
        let outcome = self.session.as_ref()?.turn_page(direction).await;
        Some(self.settle_search(outcome))
    }

    pub async fn request_match(&mut self) -> Option<MatchOutcome> {
        let outcome = self.session.as_ref()?.request_match().await;
        match &outcome {
            MatchOutcome::NoFavorites(notification) | MatchOutcome::Failed(notification) => {
                self.notify(notification.clone())
            }
            MatchOutcome::Matched(_) | MatchOutcome::Unresolved(_) => {}
        }
        Some(outcome)
    }

    /// Best-effort logout; always lands on the login view.
    pub async fn logout(&mut self) {
        if let Err(e) = self.api.logout().await {
            debug!("Ignoring logout failure: {}", e);
        }
        self.leave_search();
    }
}
