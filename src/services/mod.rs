// Service exports
pub mod obis;

pub use obis::{ObisClient, ObisError, DEFAULT_OBIS_ENDPOINT, DEFAULT_RESULT_SIZE};
