// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use rich_text::LocationId;
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// A place that can be mentioned in notes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Stable identifier, referenced from note content.
    pub id: LocationId,
    /// Display name, also used as the pill text.
    pub name: String,
    /// Latitude in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Free-form category, such as "cafe".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Location {
    /// A location with only an identifier and a name.
    pub fn new(id: impl Into<LocationId>, name: impl Into<String>) -> Self {
        NewLocation::named(name).with_id(id.into())
    }
}

/// The fields of a location that has not been stored yet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewLocation {
    /// Display name.
    pub name: String,
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Postal address.
    pub address: Option<String>,
    /// Free-form category.
    pub kind: Option<String>,
}

impl NewLocation {
    /// A location with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the coordinates.
    #[must_use]
    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Completes the location with its assigned identifier.
    pub fn with_id(self, id: LocationId) -> Location {
        Location {
            id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            address: self.address,
            kind: self.kind,
        }
    }
}

/// Storage of [`Location`] entities.
pub trait LocationStore {
    /// Stores a new location and returns its identifier.
    fn create_location(&mut self, location: NewLocation) -> LocationId;

    /// Looks up a location.
    fn location(&self, id: &LocationId) -> Result<Location, StoreError>;

    /// Locations whose name contains `query`, ignoring case, sorted by name.
    ///
    /// An empty query matches every location.
    fn search_locations(&self, query: &str) -> Vec<Location>;
}
