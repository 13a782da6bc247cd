// ABOUTME: Geographic coordinate type for station locations
// ABOUTME: Validates latitude and longitude ranges on construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{AppError, ErrorCode};

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in [-90, 90]
    pub latitude: f64,
    /// Longitude in [-180, 180]
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a validated coordinate pair
    ///
    /// # Errors
    ///
    /// Returns an error if either coordinate is outside its range or not finite
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, AppError> {
        let point = Self {
            latitude,
            longitude,
        };
        point.validate()?;
        Ok(point)
    }

    /// Check both coordinates against their ranges
    ///
    /// # Errors
    ///
    /// Returns an error if either coordinate is outside its range or not finite
    pub fn validate(&self) -> Result<(), AppError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(AppError::new(
                ErrorCode::ValueOutOfRange,
                format!("Latitude {} outside [-90, 90]", self.latitude),
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(AppError::new(
                ErrorCode::ValueOutOfRange,
                format!("Longitude {} outside [-180, 180]", self.longitude),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
