//! Domain models for parKING.
//!
//! Pure data: carparks decoded from the LTA availability payload, lookups
//! over them, and the user's favourites. No I/O happens here; the core crate
//! reads and writes the files and hands the text over.

pub mod carpark;
pub mod error;
pub mod favourites;

#[cfg(test)]
mod tests;

pub use carpark::builder::CarparkBuilder;
pub use carpark::list::CarparkList;
pub use carpark::{Carpark, LotType};
pub use common::ErrorLocation;
pub use error::model_error::ModelError;
pub use favourites::{FavouriteChange, Favourites};
