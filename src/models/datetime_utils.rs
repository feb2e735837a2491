use chrono::{DateTime, TimeZone, Utc};
use mongodb::bson::{self, Bson};
use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

/// Stores a sale date as a native BSON date so range and `$month` queries work.
pub fn serialize_datetime<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let bson_dt = Bson::DateTime(bson::DateTime::from_millis(dt.timestamp_millis()));
    bson_dt.serialize(serializer)
}

pub fn deserialize_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let bson = Bson::deserialize(deserializer)?;
    match bson {
        Bson::DateTime(dt) => Utc
            .timestamp_millis_opt(dt.timestamp_millis())
            .single()
            .ok_or_else(|| serde::de::Error::custom("BSON date out of range")),
        _ => Err(serde::de::Error::custom("expecting DateTime")),
    }
}

pub fn to_bson_datetime(dt: &DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}
