//! Search filter state

use std::collections::BTreeSet;

use pawmatch_client::constants::DEFAULT_PAGE_SIZE;
use pawmatch_client::{Cursor, SearchQuery, SortOrder};

/// Filters chosen in the search sidebar
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub breeds: BTreeSet<String>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub zip_code: Option<String>,
    pub sort: SortOrder,
}

impl SearchFilters {
    /// Select or deselect a breed. Returns whether the set changed.
    pub fn set_breed(&mut self, breed: &str, selected: bool) -> bool {
        if selected {
            self.breeds.insert(breed.to_string())
        } else {
            self.breeds.remove(breed)
        }
    }

    /// Blank zip codes clear the filter.
    pub fn set_zip_code(&mut self, zip_code: Option<&str>) {
        self.zip_code = zip_code
            .map(str::trim)
            .filter(|zip| !zip.is_empty())
            .map(str::to_string);
    }

    /// Wire query for these filters, starting at `from` (first page when `None`)
    pub fn to_query(&self, from: Option<Cursor>) -> SearchQuery {
        SearchQuery {
            breeds: self.breeds.iter().cloned().collect(),
            age_min: self.age_min,
            age_max: self.age_max,
            zip_codes: self.zip_code.iter().cloned().collect(),
            from,
            sort: self.sort,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}
