//! User-facing notifications
//!
//! The front end shows these as dismissable messages. Titles name the
//! operation that produced them; no server detail is surfaced.

use std::fmt;

/// Visual weight of a notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            severity: Severity::Info,
        }
    }

    pub fn destructive(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            severity: Severity::Destructive,
        }
    }

    pub fn welcome() -> Self {
        Self::info(
            "Welcome!",
            "Successfully logged in. Let's find you a furry friend!",
        )
    }

    pub fn login_failed() -> Self {
        Self::destructive(
            "Login Failed",
            "Please check your information and try again.",
        )
    }

    pub fn search_failed() -> Self {
        Self::destructive(
            "Search Failed",
            "Unable to search for dogs. Please try again.",
        )
    }

    pub fn breeds_failed() -> Self {
        Self::destructive(
            "Breeds Unavailable",
            "Unable to load the breed list. Please try again.",
        )
    }

    pub fn no_favorites() -> Self {
        Self::destructive(
            "No Favorites Selected",
            "Please add some dogs to your favorites first!",
        )
    }

    pub fn match_failed() -> Self {
        Self::destructive(
            "Match Failed",
            "Unable to generate a match. Please try again.",
        )
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.severity {
            Severity::Info => "*",
            Severity::Destructive => "!",
        };
        write!(f, "[{}] {}: {}", marker, self.title, self.description)
    }
}
