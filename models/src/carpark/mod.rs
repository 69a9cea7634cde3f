pub mod builder;
pub mod list;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Vehicle class a lot count applies to, as coded by the LTA feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LotType {
    #[serde(rename = "C")]
    Car,
    #[serde(rename = "Y")]
    Motorcycle,
    #[serde(rename = "H")]
    HeavyVehicle,
}

impl LotType {
    pub fn label(&self) -> &'static str {
        match self {
            LotType::Car => "Cars",
            LotType::Motorcycle => "Motorcycles",
            LotType::HeavyVehicle => "Heavy Vehicles",
        }
    }
}

/// One carpark with its availability per lot type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carpark {
    pub id: String,
    pub area: String,
    pub development: String,
    pub location: String,
    pub agency: String,
    pub lots: BTreeMap<LotType, u32>,
}

impl Carpark {
    pub fn total_lots(&self) -> u32 {
        self.lots.values().sum()
    }

    /// Single-line form used by `list` and `filter`.
    pub fn summary(&self) -> String {
        format!(
            "CarparkID {} at {} ({} lots available)",
            self.id,
            self.development,
            self.total_lots()
        )
    }

    /// Case-insensitive substring match of `word` against id, area and development.
    pub fn mentions(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        [&self.id, &self.area, &self.development]
            .iter()
            .any(|field| field.to_lowercase().contains(&word))
    }
}

impl fmt::Display for Carpark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CarparkID {} at {}", self.id, self.development)?;
        if !self.area.is_empty() {
            writeln!(f, "[{}]", self.area)?;
        }
        write!(f, "Available lots total: {}", self.total_lots())?;
        for (lot_type, count) in &self.lots {
            write!(f, "\n   {}: {}", lot_type.label(), count)?;
        }
        Ok(())
    }
}
