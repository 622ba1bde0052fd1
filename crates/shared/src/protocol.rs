use serde::{Deserialize, Serialize};

use crate::domain::DrawingId;

/// Body of `POST /api/drawings`: the drawing as a data-URL string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDrawingRequest {
    pub img: String,
}

/// Response to a create call. The guess arrives as a raw wire integer;
/// the client validates it into a `Digit` on receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDrawingResponse {
    pub id: DrawingId,
    pub guess: u8,
}

/// Body of `PATCH /api/drawings/{id}`: the human-supplied true label.
/// Wide on purpose: the value is whatever the judgment parsed, taken
/// verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionRequest {
    pub digit: i64,
}
