use serde::{Deserialize, Deserializer, Serialize};

/// Fixed material taxonomy the vision model classifies into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialCategory {
    #[serde(alias = "plastic", alias = "PLASTIC")]
    Plastic,
    #[serde(alias = "paper", alias = "PAPER", alias = "Cardboard", alias = "cardboard")]
    Paper,
    #[serde(alias = "metal", alias = "METAL")]
    Metal,
    #[serde(alias = "glass", alias = "GLASS")]
    Glass,
    #[serde(alias = "organic", alias = "ORGANIC")]
    Organic,
    #[serde(
        rename = "E-Waste",
        alias = "e-waste",
        alias = "E-waste",
        alias = "Electronic",
        alias = "electronic"
    )]
    EWaste,
    #[serde(alias = "textile", alias = "TEXTILE")]
    Textile,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(alias = "a")]
    A,
    #[serde(alias = "b")]
    B,
    #[serde(alias = "c")]
    C,
}

/// Structured classification of one uploaded waste photo.
///
/// Every field is required; a provider reply missing any of them is rejected
/// as malformed rather than returned partially.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub category: MaterialCategory,
    pub grade: Grade,
    pub suggested_price: String,
    pub quantity: String,
    pub quality: String,
    #[serde(deserialize_with = "percent")]
    pub contamination: u8,
    #[serde(deserialize_with = "percent")]
    pub confidence: u8,
}

fn percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() {
        return Err(serde::de::Error::custom("percentage must be a finite number"));
    }
    Ok(value.round().clamp(0.0, 100.0) as u8)
}
