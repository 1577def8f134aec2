pub mod errors;
pub mod frame;
pub mod model;
pub mod normalize;
pub mod store;

pub use errors::RecordError;
pub use frame::{pickups_frame, readings_frame, timestamp_column, with_hour_column};
pub use model::{
    parse_timestamp_text, Activity, PickupEvent, PickupRecord, Reading, READING_COLUMNS, TIMESTAMP_FORMAT,
};
pub use normalize::normalize_pickups;
pub use store::{
    parse_timestamp, read_readings, read_readings_from, write_readings, write_readings_to,
};
