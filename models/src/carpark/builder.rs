use crate::carpark::{Carpark, LotType};
use crate::error::model_error::ModelError;
use crate::ErrorLocation;

use std::collections::BTreeMap;
use std::panic::Location;

/// Builder for validated [`Carpark`] instances.
///
/// The LTA feed sends one record per (carpark, lot type); the builder is
/// seeded from the first record and then collects the remaining lot counts.
#[derive(Debug, Default)]
pub struct CarparkBuilder {
    id: Option<String>,
    area: Option<String>,
    development: Option<String>,
    location: Option<String>,
    agency: Option<String>,
    lots: BTreeMap<LotType, u32>,
}

impl CarparkBuilder {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    pub fn with_development(mut self, development: impl Into<String>) -> Self {
        self.development = Some(development.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_agency(mut self, agency: impl Into<String>) -> Self {
        self.agency = Some(agency.into());
        self
    }

    /// Record the availability for one lot type.
    ///
    /// # Errors
    /// A second count for the same lot type is rejected as a duplicate record.
    #[track_caller]
    pub fn add_lots(&mut self, lot_type: LotType, available: u32) -> Result<(), ModelError> {
        if self.lots.insert(lot_type, available).is_some() {
            return Err(ModelError::DuplicateCarparkId {
                carpark_id: self.id.clone().unwrap_or_default(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    pub fn with_lots(mut self, lot_type: LotType, available: u32) -> Self {
        self.lots.insert(lot_type, available);
        self
    }

    #[track_caller]
    pub fn build(self) -> Result<Carpark, ModelError> {
        let id = self.id.ok_or_else(|| ModelError::Validation {
            message: String::from("Carpark ID is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if id.trim().is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Carpark ID cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let development = self.development.ok_or_else(|| ModelError::Validation {
            message: format!("Development is required for carpark {id}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Carpark {
            id,
            area: self.area.unwrap_or_default(),
            development,
            location: self.location.unwrap_or_default(),
            agency: self.agency.unwrap_or_default(),
            lots: self.lots,
        })
    }
}
