mod rds;

pub use rds::{sdk_error, RdsRepository};
