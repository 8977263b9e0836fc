use crate::core::models::compound::Compound;
use crate::core::models::element::Element;
use serde::Deserialize;
use thiserror::Error;

/// The JSON a drag source attaches to a drop: `{ "item": {...}, "type": "element" | "compound" }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "item", rename_all = "lowercase")]
pub enum DropPayload {
    Element(Element),
    Compound(Compound),
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Malformed drop payload: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn decode_drop(raw: &str) -> Result<DropPayload, PayloadError> {
    Ok(serde_json::from_str(raw)?)
}
