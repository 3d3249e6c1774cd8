//! Text renderers
//!
//! Pure display components: each takes the data it shows plus callbacks, and
//! keeps no state of its own.

use std::fmt;

use pawmatch_client::Dog;

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

fn age_label(age: u32) -> String {
    if age == 1 {
        "1 year old".to_string()
    } else {
        format!("{age} years old")
    }
}

fn image_of(dog: &Dog) -> &str {
    if dog.img.is_empty() {
        PLACEHOLDER_IMAGE
    } else {
        &dog.img
    }
}

/// Result card for one dog
pub struct DogCard<'a, F: FnMut(&str)> {
    dog: &'a Dog,
    is_favorite: bool,
    on_toggle_favorite: F,
}

impl<'a, F: FnMut(&str)> DogCard<'a, F> {
    pub fn new(dog: &'a Dog, is_favorite: bool, on_toggle_favorite: F) -> Self {
        Self {
            dog,
            is_favorite,
            on_toggle_favorite,
        }
    }

    /// Heart button pressed
    pub fn toggle_favorite(&mut self) {
        (self.on_toggle_favorite)(&self.dog.id);
    }
}

impl<F: FnMut(&str)> fmt::Display for DogCard<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heart = if self.is_favorite { "♥" } else { "♡" };
        writeln!(f, "{} {} [{}]  ({})", heart, self.dog.name, self.dog.breed, self.dog.id)?;
        writeln!(f, "    {}", age_label(self.dog.age))?;
        writeln!(f, "    zip {}", self.dog.zip_code)?;
        write!(f, "    {}", image_of(self.dog))
    }
}

/// Announcement shown after a successful match
pub struct MatchModal<'a, F: FnMut()> {
    dog: &'a Dog,
    is_open: bool,
    on_close: F,
}

impl<'a, F: FnMut()> MatchModal<'a, F> {
    pub fn new(dog: &'a Dog, is_open: bool, on_close: F) -> Self {
        Self {
            dog,
            is_open,
            on_close,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// "Keep Browsing" pressed. Only the caller decides what closing means.
    pub fn close(&mut self) {
        (self.on_close)();
    }

    /// Rendered text, or `None` while the modal is closed
    pub fn render(&self) -> Option<String> {
        self.is_open.then(|| self.to_string())
    }
}

impl<F: FnMut()> fmt::Display for MatchModal<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dog = self.dog;
        writeln!(f, "✨ It's a Match!")?;
        writeln!(f, "{} ♥  [{}]", dog.name, dog.breed)?;
        writeln!(f, "{} · zip {}", age_label(dog.age), dog.zip_code)?;
        writeln!(f, "{}", image_of(dog))?;
        write!(
            f,
            "Congratulations! Based on your favorites, we think {} would be perfect for you. \
             This adorable {} is ready to find their forever home!",
            dog.name,
            dog.breed.to_lowercase()
        )
    }
}

/// Result count line plus pagination controls
#[derive(Clone, Copy, Debug)]
pub struct ResultsHeader {
    pub total: Option<u64>,
    pub page: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub favorites: usize,
}

impl ResultsHeader {
    pub const EMPTY_MESSAGE: &'static str =
        "No dogs found matching your criteria.\nTry adjusting your filters and search again.";
}

impl fmt::Display for ResultsHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.total {
            Some(total) => write!(f, "{} dogs found", total)?,
            None => write!(f, "Loading...")?,
        }
        let prev = if self.has_prev { "[prev]" } else { " prev " };
        let next = if self.has_next { "[next]" } else { " next " };
        write!(
            f,
            "  | page {} {} {} | {} Favorites",
            self.page + 1,
            prev,
            next,
            self.favorites
        )
    }
}
