pub mod fetch;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod writer;

pub use crate::domain::model::{ExecuteOutcome, GeocodeResult, LookupRequest, OutputRecord};
pub use crate::domain::ports::{ConfigSource, Geocoder, Host, Storage};
pub use crate::utils::error::Result;
