pub mod auxiliary;
pub mod ranger_error;
pub mod timing;
