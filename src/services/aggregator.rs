// src/services/aggregator.rs
// DOCUMENTATION: Multi-city nearby search orchestration
// PURPOSE: Search every city, enrich each result with a phone number and
// flatten everything into BusinessRecords

use crate::errors::AggregationError;
use crate::models::{BusinessRecord, City, Rating};
use crate::services::{PlaceDetailsResolver, PlacesApi};
use std::time::Instant;

/// Nearby search aggregator
/// DOCUMENTATION: Runs strictly sequentially. One search per city (first
/// page only), then one details lookup per result, in upstream order
pub struct NearbySearchAggregator<'a> {
    api: &'a dyn PlacesApi,
    resolver: PlaceDetailsResolver<'a>,
}

impl<'a> NearbySearchAggregator<'a> {
    pub fn new(api: &'a dyn PlacesApi) -> Self {
        Self {
            api,
            resolver: PlaceDetailsResolver::new(api),
        }
    }

    /// Aggregate businesses for all `cities`
    /// DOCUMENTATION: Output follows city order, then search-result order.
    /// The first failing search stops the run; the error carries the
    /// records gathered from the cities before it
    ///
    /// # Arguments
    /// * `cities` - Search centers, visited in order
    /// * `keyword` - Search keyword
    /// * `radius_m` - Search radius in meters
    pub async fn aggregate(
        &self,
        cities: &[City],
        keyword: &str,
        radius_m: u32,
    ) -> Result<Vec<BusinessRecord>, AggregationError> {
        let start_time = Instant::now();
        let mut records = Vec::new();

        for city in cities {
            log::info!("Fetching data for {}", city.name);

            let places = match self
                .api
                .nearby_search(city.lat, city.lng, radius_m, keyword)
                .await
            {
                Ok(places) => places,
                Err(e) => {
                    log::error!(
                        "Search failed for {}, aborting with {} records gathered: {}",
                        city.name,
                        records.len(),
                        e
                    );
                    return Err(AggregationError {
                        city: city.name.clone(),
                        partial: records,
                        source: e,
                    });
                }
            };

            for place in places {
                let phone = self.resolver.resolve(&place.place_id).await;

                records.push(BusinessRecord {
                    city: city.name.clone(),
                    name: place.display_name(),
                    address: place.address(),
                    rating: Rating::from_upstream(place.rating),
                    phone,
                });
            }
        }

        log::info!(
            "Aggregated {} businesses across {} cities in {}s",
            records.len(),
            cities.len(),
            start_time.elapsed().as_secs()
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LeadsError;
    use crate::services::fakes::{place, FakePlaces};

    fn testville() -> City {
        City::new("Testville", 1.0, 2.0)
    }

    #[tokio::test]
    async fn test_single_city_with_failed_details() {
        let api = FakePlaces::new()
            .with_search(1.0, 2.0, vec![place("p1", "Acme", "1 Main St", None)])
            .with_failing_phone("p1");

        let records = NearbySearchAggregator::new(&api)
            .aggregate(&[testville()], "window cleaning", 50000)
            .await
            .unwrap();

        assert_eq!(
            records,
            vec![BusinessRecord {
                city: "Testville".to_string(),
                name: "Acme".to_string(),
                address: "1 Main St".to_string(),
                rating: Rating::NotAvailable,
                phone: "Error Fetching Number".to_string(),
            }]
        );
        assert_eq!(
            api.search_calls(),
            vec![(1.0, 2.0, 50000, "window cleaning".to_string())]
        );
    }

    #[tokio::test]
    async fn test_no_cities_makes_no_calls() {
        let api = FakePlaces::new();

        let records = NearbySearchAggregator::new(&api)
            .aggregate(&[], "window cleaning", 50000)
            .await
            .unwrap();

        assert!(records.is_empty());
        assert!(api.search_calls().is_empty());
        assert!(api.detail_calls().is_empty());
    }

    #[tokio::test]
    async fn test_order_and_city_attribution() {
        let north = City::new("North", 10.0, 20.0);
        let south = City::new("South", -10.0, -20.0);
        let api = FakePlaces::new()
            .with_search(
                10.0,
                20.0,
                vec![
                    place("n1", "Glass Act", "1 Pine Rd", Some(4.9)),
                    place("n2", "Clear View", "2 Pine Rd", None),
                ],
            )
            .with_search(-10.0, -20.0, vec![place("s1", "Shine On", "3 Bay St", Some(3.5))])
            .with_phone("n1", Some("555-0001"))
            .with_phone("n2", None)
            .with_phone("s1", Some("555-0003"));

        let records = NearbySearchAggregator::new(&api)
            .aggregate(&[north, south], "window cleaning", 1500)
            .await
            .unwrap();

        let summary: Vec<(&str, &str, &str)> = records
            .iter()
            .map(|r| (r.city.as_str(), r.name.as_str(), r.phone.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("North", "Glass Act", "555-0001"),
                ("North", "Clear View", "No Phone Number"),
                ("South", "Shine On", "555-0003"),
            ]
        );
        assert_eq!(records[0].rating, Rating::Score(4.9));
        assert_eq!(records[1].rating, Rating::NotAvailable);

        assert_eq!(api.search_calls().len(), 2);
        assert_eq!(api.detail_calls(), vec!["n1", "n2", "s1"]);
    }

    #[tokio::test]
    async fn test_search_failure_aborts_with_partial_records() {
        let first = City::new("First", 1.0, 1.0);
        let second = City::new("Second", 2.0, 2.0);
        let third = City::new("Third", 3.0, 3.0);
        let api = FakePlaces::new()
            .with_search(1.0, 1.0, vec![place("a", "Alpha", "1 A St", None)])
            .with_failing_search(2.0, 2.0)
            .with_search(3.0, 3.0, vec![place("c", "Gamma", "3 C St", None)])
            .with_phone("a", Some("555-0101"));

        let err = NearbySearchAggregator::new(&api)
            .aggregate(&[first, second, third], "window cleaning", 50000)
            .await
            .unwrap_err();

        assert_eq!(err.city, "Second");
        assert!(matches!(err.source, LeadsError::ExternalApi(_)));
        assert_eq!(err.partial.len(), 1);
        assert_eq!(err.partial[0].name, "Alpha");

        // the third city is never searched
        assert_eq!(api.search_calls().len(), 2);
        assert_eq!(api.detail_calls(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_empty_search_result_is_not_an_error() {
        let api = FakePlaces::new().with_search(1.0, 2.0, Vec::new());

        let records = NearbySearchAggregator::new(&api)
            .aggregate(&[testville()], "window cleaning", 50000)
            .await
            .unwrap();

        assert!(records.is_empty());
        assert!(api.detail_calls().is_empty());
    }
}
