//! Client model types
//!
//! This module defines the request and response bodies exchanged with the
//! dog adoption service.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{CURSOR_PARAM, DEFAULT_PAGE_SIZE};

/// Adoptable dog as returned by `POST /dogs`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub id: String,
    pub img: String,
    pub name: String,
    pub age: u32,
    pub zip_code: String,
    pub breed: String,
}

/// One page of search results
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub result_ids: Vec<String>,
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

/// Response of `POST /dogs/match`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "match")]
    pub matched_id: String,
}

/// Body of `POST /auth/login`
#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Direction of the breed sort
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Value of the `sort` query parameter (`field:direction`)
    pub fn sort_param(&self) -> String {
        format!("breed:{}", self.as_str())
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Opaque pagination token issued by the search endpoint.
///
/// Only meaningful for the filter and sort combination that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the `from` token of a `next`/`prev` link.
    ///
    /// Links are relative URLs, so they are resolved against `base` first.
    /// A link without a `from` parameter points at the first page.
    pub fn from_link(base: &Url, link: &str) -> crate::Result<Option<Cursor>> {
        let url = base.join(link)?;
        Ok(url
            .query_pairs()
            .find(|(key, _)| key == CURSOR_PARAM)
            .map(|(_, value)| Cursor(value.into_owned()))
            .filter(|cursor| !cursor.0.is_empty()))
    }
}

/// Query of `GET /dogs/search`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    pub breeds: Vec<String>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub zip_codes: Vec<String>,
    pub from: Option<Cursor>,
    pub sort: SortOrder,
    pub size: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            breeds: Vec::new(),
            age_min: None,
            age_max: None,
            zip_codes: Vec::new(),
            from: None,
            sort: SortOrder::Asc,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchQuery {
    /// Encode as query pairs; `breeds` and `zipCodes` repeat once per value.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(self.breeds.len() + self.zip_codes.len() + 5);
        for breed in &self.breeds {
            pairs.push(("breeds", breed.clone()));
        }
        if let Some(age_min) = self.age_min {
            pairs.push(("ageMin", age_min.to_string()));
        }
        if let Some(age_max) = self.age_max {
            pairs.push(("ageMax", age_max.to_string()));
        }
        for zip in &self.zip_codes {
            pairs.push(("zipCodes", zip.clone()));
        }
        if let Some(from) = &self.from {
            pairs.push(("from", from.as_str().to_string()));
        }
        pairs.push(("sort", self.sort.sort_param()));
        pairs.push(("size", self.size.to_string()));
        pairs
    }
}
