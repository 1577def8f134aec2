use crate::errors::RecordError;
use crate::model::{PickupEvent, PickupRecord};
use crate::store::parse_timestamp;

const TABLE: &str = "pickups";

/// Type the raw pickup timestamps. Fails on the first malformed value.
pub fn normalize_pickups(records: &[PickupRecord]) -> Result<Vec<PickupEvent>, RecordError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let pickup_time = parse_timestamp(TABLE, &record.pickup_time, index + 1)?;
            Ok(PickupEvent {
                pickup_time,
                latitude: record.latitude,
                longitude: record.longitude,
                cluster: None,
            })
        })
        .collect()
}
