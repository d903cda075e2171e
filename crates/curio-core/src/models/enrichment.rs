// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured results returned by the AI enrichment adapter.
//!
//! Field names follow the JSON shape the model is asked to produce, so these
//! types deserialize straight from a tool-call input.

use serde::{Deserialize, Serialize};

use super::library::{
    Difficulty, Ingredient, MediaKind, MediaStatus, NewMediaItem, NewRecipe, NewRestaurant,
    RestaurantStatus,
};

/// Query used when restaurant discovery is called with an empty query.
pub const DEFAULT_DISCOVERY_QUERY: &str = "What's hot right now in London";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaClassification {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    #[serde(default)]
    pub author_or_director: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Model confidence, 0 to 1.
    #[serde(default)]
    pub confidence: f64,
}

impl MediaClassification {
    /// Turns a classification into a queued library entry.
    ///
    /// The original input is kept as the URL only when it looks like one.
    /// The summary becomes the initial review.
    pub fn into_new_media(self, input: &str) -> NewMediaItem {
        let input = input.trim();
        NewMediaItem {
            title: self.title,
            kind: self.kind,
            status: MediaStatus::Queued,
            url: input.starts_with("http").then(|| input.to_string()),
            image: None,
            tags: self.tags,
            rating: None,
            review: self.summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecipe {
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Full step-by-step instructions.
    #[serde(default)]
    pub method: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub summary: String,
}

impl ExtractedRecipe {
    pub fn into_new_recipe(self, source_url: Option<String>) -> NewRecipe {
        NewRecipe {
            title: self.title,
            ingredients: self.ingredients,
            method: self.method,
            image: None,
            source_url,
            rating: None,
            difficulty: Some(self.difficulty),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSuggestion {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub cuisine: String,
    /// `$`, `$$`, `$$$` or `$$$$`.
    #[serde(default)]
    pub price_range: String,
    /// Why it is recommended.
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub booking_url: Option<String>,
}

impl RestaurantSuggestion {
    /// Quick-add: the recommendation reason becomes the initial review.
    pub fn into_new_restaurant(self) -> NewRestaurant {
        fn non_empty(s: String) -> Option<String> {
            (!s.trim().is_empty()).then_some(s)
        }
        NewRestaurant {
            name: self.name,
            location: non_empty(self.location),
            cuisine: non_empty(self.cuisine),
            price_range: non_empty(self.price_range),
            rating: None,
            review: non_empty(self.reason),
            booking_url: self.booking_url.and_then(non_empty),
            status: RestaurantStatus::Wishlist,
            tags: Vec::new(),
            image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantDiscovery {
    #[serde(default)]
    pub restaurants: Vec<RestaurantSuggestion>,
    #[serde(default)]
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_keeps_url_inputs_only() {
        let c = MediaClassification {
            title: "Dune".into(),
            kind: MediaKind::Book,
            author_or_director: Some("Frank Herbert".into()),
            summary: Some("Spice.".into()),
            tags: vec!["sci-fi".into()],
            confidence: 0.9,
        };
        let from_url = c.clone().into_new_media("https://example.com/dune");
        assert_eq!(from_url.url.as_deref(), Some("https://example.com/dune"));
        assert_eq!(from_url.review.as_deref(), Some("Spice."));
        assert_eq!(from_url.status, MediaStatus::Queued);

        let from_text = c.into_new_media("that desert book");
        assert_eq!(from_text.url, None);
    }

    #[test]
    fn classification_reads_model_field_names() {
        let json = r#"{"title":"Heat","type":"movie","authorOrDirector":"Michael Mann","confidence":0.8}"#;
        let c: MediaClassification = serde_json::from_str(json).unwrap();
        assert_eq!(c.kind, MediaKind::Movie);
        assert_eq!(c.author_or_director.as_deref(), Some("Michael Mann"));
        assert!(c.tags.is_empty());
    }

    #[test]
    fn suggestion_quick_add_uses_reason_as_review() {
        let s = RestaurantSuggestion {
            name: "Bocca".into(),
            location: "Soho".into(),
            cuisine: "Italian".into(),
            price_range: "$$".into(),
            reason: "Fresh pasta".into(),
            booking_url: Some(String::new()),
        };
        let r = s.into_new_restaurant();
        assert_eq!(r.review.as_deref(), Some("Fresh pasta"));
        assert_eq!(r.booking_url, None);
        assert_eq!(r.status, RestaurantStatus::Wishlist);
    }
}
