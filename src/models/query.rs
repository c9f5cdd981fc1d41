// src/models/query.rs
// DOCUMENTATION: Query parameters accepted by the aggregation routes

use serde::Deserialize;
use validator::Validate;

/// Optional overrides for an aggregation run
/// DOCUMENTATION: Missing fields fall back to the configured defaults
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AggregationQuery {
    /// Search keyword (e.g., "window cleaning")
    #[validate(length(min = 1, max = 100))]
    pub keyword: Option<String>,

    /// Search radius in meters (Places API maximum is 50000)
    #[validate(range(min = 1, max = 50000))]
    pub radius: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_valid() {
        assert!(AggregationQuery::default().validate().is_ok());
    }

    #[test]
    fn test_radius_bounds() {
        let query = AggregationQuery {
            keyword: None,
            radius: Some(50001),
        };
        assert!(query.validate().is_err());

        let query = AggregationQuery {
            keyword: Some("gutter cleaning".to_string()),
            radius: Some(2000),
        };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let query = AggregationQuery {
            keyword: Some(String::new()),
            radius: None,
        };
        assert!(query.validate().is_err());
    }
}
