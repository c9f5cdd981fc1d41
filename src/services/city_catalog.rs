// src/services/city_catalog.rs
// DOCUMENTATION: Static list of search centers
// PURPOSE: Define which cities are searched and in what order

use crate::models::City;

/// (name, latitude, longitude), in search order
const TOP_US_CITIES: &[(&str, f64, f64)] = &[
    ("New York, NY", 40.7128, -74.0060),
    ("Los Angeles, CA", 34.0522, -118.2437),
    ("Chicago, IL", 41.8781, -87.6298),
    ("Houston, TX", 29.7604, -95.3698),
    ("Phoenix, AZ", 33.4484, -112.0740),
    ("Philadelphia, PA", 39.9526, -75.1652),
];

/// City catalog
/// DOCUMENTATION: Source of truth for aggregation order; read-only
pub struct CityCatalog;

impl CityCatalog {
    /// All catalog cities, in iteration order
    pub fn all() -> Vec<City> {
        TOP_US_CITIES
            .iter()
            .map(|&(name, lat, lng)| City::new(name, lat, lng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_order_is_stable() {
        let names: Vec<String> = CityCatalog::all().into_iter().map(|c| c.name).collect();
        assert_eq!(names.first().map(String::as_str), Some("New York, NY"));
        assert_eq!(names.last().map(String::as_str), Some("Philadelphia, PA"));
        assert_eq!(names, CityCatalog::all().into_iter().map(|c| c.name).collect::<Vec<_>>());
    }

    #[test]
    fn test_city_names_are_unique() {
        let cities = CityCatalog::all();
        let names: HashSet<&str> = cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), cities.len());
    }

    #[test]
    fn test_coordinates_in_range() {
        for city in CityCatalog::all() {
            assert!((-90.0..=90.0).contains(&city.lat), "{}", city.name);
            assert!((-180.0..=180.0).contains(&city.lng), "{}", city.name);
        }
    }
}
