use crate::carpark::builder::CarparkBuilder;
use crate::carpark::{Carpark, LotType};
use crate::error::model_error::ModelError;

use std::collections::HashMap;

use serde::Deserialize;

/// Envelope of the LTA `CarParkAvailabilityv2` payload.
#[derive(Debug, Deserialize)]
struct LtaPayload {
    value: Vec<LtaRecord>,
}

#[derive(Debug, Deserialize)]
struct LtaRecord {
    #[serde(rename = "CarParkID")]
    carpark_id: String,
    #[serde(rename = "Area", default)]
    area: String,
    #[serde(rename = "Development")]
    development: String,
    #[serde(rename = "Location", default)]
    location: String,
    #[serde(rename = "AvailableLots")]
    available_lots: u32,
    #[serde(rename = "LotType")]
    lot_type: LotType,
    #[serde(rename = "Agency", default)]
    agency: String,
}

/// All carparks from the last successful fetch, in feed order.
#[derive(Debug, Clone, Default)]
pub struct CarparkList {
    carparks: Vec<Carpark>,
}

impl CarparkList {
    pub fn new(carparks: Vec<Carpark>) -> Self {
        Self { carparks }
    }

    /// Decode the raw body the fetch engine persisted.
    ///
    /// Records sharing a `CarParkID` are merged into one carpark.
    ///
    /// # Errors
    /// - [`ModelError::Decode`] if the JSON does not have the LTA shape
    /// - [`ModelError::DuplicateCarparkId`] if a carpark repeats a lot type
    #[track_caller]
    pub fn from_lta_json(json: &str) -> Result<Self, ModelError> {
        let payload: LtaPayload = serde_json::from_str(json)?;

        let mut order: Vec<CarparkBuilder> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in payload.value {
            let slot = match index.get(&record.carpark_id) {
                Some(&slot) => slot,
                None => {
                    index.insert(record.carpark_id.clone(), order.len());
                    order.push(
                        CarparkBuilder::default()
                            .with_id(record.carpark_id.clone())
                            .with_area(record.area)
                            .with_development(record.development)
                            .with_location(record.location)
                            .with_agency(record.agency),
                    );
                    order.len() - 1
                }
            };
            order[slot].add_lots(record.lot_type, record.available_lots)?;
        }

        let carparks = order
            .into_iter()
            .map(CarparkBuilder::build)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { carparks })
    }

    /// Exact, case-insensitive lookup by carpark id.
    pub fn find(&self, carpark_id: &str) -> Option<&Carpark> {
        self.carparks
            .iter()
            .find(|carpark| carpark.id.eq_ignore_ascii_case(carpark_id))
    }

    /// Carparks mentioning every whitespace-separated word of `query`.
    pub fn filter(&self, query: &str) -> Vec<&Carpark> {
        let words: Vec<&str> = query.split_whitespace().collect();
        self.carparks
            .iter()
            .filter(|carpark| words.iter().all(|word| carpark.mentions(word)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Carpark> {
        self.carparks.iter()
    }

    pub fn len(&self) -> usize {
        self.carparks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carparks.is_empty()
    }
}
