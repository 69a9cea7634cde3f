pub mod api;
pub mod config;
pub mod error;
pub mod parser;
pub mod storage;

#[cfg(test)]
mod tests;

pub const LTA_HOSTNAME: &str = "datamall2.mytransport.sg";
pub const LTA_BASE_URL: &str = const_format::concatcp!(
    "http://",
    LTA_HOSTNAME,
    "/ltaodataservice/CarParkAvailabilityv2"
);
pub const LTA_AUTH_HEADER: &str = "AccountKey";
pub const DEFAULT_API_KEY: &str = "1B+7tBxzRNOtFbTxGcCiYA==";
