// src/services/details_resolver.rs
// DOCUMENTATION: Phone number enrichment for search results
// PURPOSE: Turn a place identifier into a phone number or a sentinel

use crate::models::{ERROR_FETCHING_NUMBER, NO_PHONE_NUMBER};
use crate::services::PlacesApi;

/// Resolves the phone number of a single place
/// DOCUMENTATION: Never fails; lookup errors are logged and downgraded to
/// the "Error Fetching Number" sentinel
pub struct PlaceDetailsResolver<'a> {
    api: &'a dyn PlacesApi,
}

impl<'a> PlaceDetailsResolver<'a> {
    pub fn new(api: &'a dyn PlacesApi) -> Self {
        Self { api }
    }

    /// Phone number for `place_id`, or one of the phone sentinels
    pub async fn resolve(&self, place_id: &str) -> String {
        if place_id.is_empty() {
            log::warn!("Search result without place_id, skipping details lookup");
            return ERROR_FETCHING_NUMBER.to_string();
        }

        match self.api.phone_number(place_id).await {
            Ok(Some(phone)) => phone,
            Ok(None) => NO_PHONE_NUMBER.to_string(),
            Err(e) => {
                log::error!("Error fetching place details for {}: {}", place_id, e);
                ERROR_FETCHING_NUMBER.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::FakePlaces;

    #[tokio::test]
    async fn test_resolve_returns_phone() {
        let api = FakePlaces::new().with_phone("p1", Some("(602) 555-0199"));
        let resolver = PlaceDetailsResolver::new(&api);

        assert_eq!(resolver.resolve("p1").await, "(602) 555-0199");
        assert_eq!(api.detail_calls(), vec!["p1".to_string()]);
    }

    #[tokio::test]
    async fn test_resolve_without_phone() {
        let api = FakePlaces::new().with_phone("p1", None);
        let resolver = PlaceDetailsResolver::new(&api);

        assert_eq!(resolver.resolve("p1").await, "No Phone Number");
    }

    #[tokio::test]
    async fn test_resolve_failure_becomes_sentinel() {
        let api = FakePlaces::new().with_failing_phone("p1");
        let resolver = PlaceDetailsResolver::new(&api);

        assert_eq!(resolver.resolve("p1").await, "Error Fetching Number");
    }

    #[tokio::test]
    async fn test_empty_place_id_makes_no_call() {
        let api = FakePlaces::new();
        let resolver = PlaceDetailsResolver::new(&api);

        assert_eq!(resolver.resolve("").await, "Error Fetching Number");
        assert!(api.detail_calls().is_empty());
    }
}
