use bson::Bson;
use serde::Deserialize;

use crate::errors::Result;

/// Convert a serde_json::Value into Bson. Extended JSON wrappers such as
/// `{"$regularExpression": {...}}` become their BSON counterparts.
pub fn json_value_to_bson(val: &serde_json::Value) -> Result<Bson> {
    Ok(Bson::deserialize(val)?)
}

/// Parse a JSON string into Bson.
pub fn parse_json_to_bson(json: &str) -> Result<Bson> {
    Ok(serde_json::from_str(json)?)
}
