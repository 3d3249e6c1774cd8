//! PawMatch Core - client-side state for the dog adoption service
//!
//! Owns everything between the HTTP SDK and the front end:
//! - login flow and view navigation
//! - search filters, pagination and the stale-response guard
//! - favorites and match resolution
//! - notifications and text renderers for cards and the match modal

pub mod app;
pub mod auth;
pub mod favorites;
pub mod filters;
pub mod notification;
pub mod render;
pub mod session;

pub use app::{App, View};
pub use auth::{Credentials, CredentialsError, LoginOutcome};
pub use favorites::Favorites;
pub use filters::SearchFilters;
pub use notification::{Notification, Severity};
pub use render::{DogCard, MatchModal, ResultsHeader};
pub use session::{MatchOutcome, PageDirection, SearchOutcome, SearchSession};
