// Catalog API types.
// Defines the book projection held by the cache and the partial patch applied to it.

use serde::{Deserialize, Serialize};

/// Category attached to an author's contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookType {
    pub id: String,
    pub name: String,
}

/// Author credit on a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAuthor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_type: Option<BookType>,
}

/// Read-only projection of a catalog book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedBook {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub cover_image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<BookAuthor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprint_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Reviews, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluations: Option<Vec<serde_json::Value>>,
}

impl CachedBook {
    /// Minimal book with only the required fields set.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            cover_image_url: String::new(),
            authors: None,
            rating: None,
            reprint_year: None,
            is_liked: None,
            description: None,
            publisher: None,
            price: None,
            evaluations: None,
        }
    }

    /// Shallow merge: fields set in `patch` win, everything else is kept.
    pub fn apply(&self, patch: &BookPatch) -> Self {
        let mut merged = self.clone();
        if let Some(title) = &patch.title {
            merged.title = title.clone();
        }
        if let Some(url) = &patch.cover_image_url {
            merged.cover_image_url = url.clone();
        }
        if let Some(authors) = &patch.authors {
            merged.authors = Some(authors.clone());
        }
        if let Some(rating) = patch.rating {
            merged.rating = Some(rating);
        }
        if let Some(year) = patch.reprint_year {
            merged.reprint_year = Some(year);
        }
        if let Some(liked) = patch.is_liked {
            merged.is_liked = Some(liked);
        }
        if let Some(description) = &patch.description {
            merged.description = Some(description.clone());
        }
        if let Some(publisher) = &patch.publisher {
            merged.publisher = Some(publisher.clone());
        }
        if let Some(price) = patch.price {
            merged.price = Some(price);
        }
        if let Some(evaluations) = &patch.evaluations {
            merged.evaluations = Some(evaluations.clone());
        }
        merged
    }

    /// Comma-separated author names, or an empty string.
    pub fn author_names(&self) -> String {
        self.authors
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Partial update for a cached book. `id` is immutable and has no counterpart here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    pub title: Option<String>,
    pub cover_image_url: Option<String>,
    pub authors: Option<Vec<BookAuthor>>,
    pub rating: Option<f64>,
    pub reprint_year: Option<i32>,
    pub is_liked: Option<bool>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub price: Option<f64>,
    pub evaluations: Option<Vec<serde_json::Value>>,
}

impl BookPatch {
    /// Patch that only flips the liked flag.
    pub fn liked(is_liked: bool) -> Self {
        Self {
            is_liked: Some(is_liked),
            ..Self::default()
        }
    }
}
