//! Prompt templates sent to the generation providers

use crate::models::content::or_default;
use crate::models::{DescriptionRequest, ProductImageRequest, ReportRequest, StoryRequest};

pub const ANALYSIS_PROMPT: &str = r#"You are a waste-classification assistant for a recycling marketplace.
Inspect the photo and reply with ONLY a JSON object, no prose and no Markdown, using exactly these keys:
{
  "category": one of "Plastic", "Paper", "Metal", "Glass", "Organic", "E-Waste", "Textile", "Other",
  "grade": "A", "B" or "C" (A = clean and sorted, C = mixed or heavily soiled),
  "suggestedPrice": a market price per kg formatted with a currency symbol, e.g. "₹18/kg",
  "quantity": an estimated weight range as text, e.g. "20-30 kg",
  "quality": a short description of the material condition,
  "contamination": integer percentage 0-100,
  "confidence": integer percentage 0-100
}"#;

pub fn inventory_description(request: &DescriptionRequest) -> String {
    let category = or_default(&request.category, "Waste");
    let grade = or_default(&request.grade, "B");
    let quantity = or_default(&request.quantity, "—");
    let location = or_default(&request.location, "—");
    format!(
        "Write a concise, factual marketplace listing description (2-3 sentences) for a batch of \
         recyclable {category} material, quality grade {grade}, quantity {quantity}, located in \
         {location}. Mention suitable recycling uses and handling notes. Plain text only, no Markdown."
    )
}

pub fn product_story(request: &StoryRequest) -> String {
    let product = or_default(&request.product_name, "Upcycled product");
    let materials = or_default(&request.materials, "recycled materials");
    let category = or_default(&request.category, "Eco-friendly goods");
    let company = or_default(&request.company_name, "a local recycler");
    format!(
        "Write a warm, short product story (one paragraph, under 120 words) for \"{product}\" in the \
         {category} category, made from {materials} by {company}. Highlight the waste it diverts \
         from landfill and the circular-economy impact. Plain text only, no Markdown."
    )
}

pub fn product_image(request: &ProductImageRequest) -> String {
    let product = or_default(&request.product_name, "Upcycled product");
    let category = or_default(&request.category, "eco-friendly goods");
    format!(
        "Professional studio product photograph of {product}, an upcycled {category} item made from \
         recycled waste materials. Clean neutral background, soft natural lighting, sharp focus, \
         high detail, e-commerce catalogue style, no text or watermarks."
    )
}

pub const DEFAULT_REPORT_FROM: &str = "the start of records";
pub const DEFAULT_REPORT_TO: &str = "today";

pub fn report_period(request: &ReportRequest) -> (&str, &str) {
    (
        or_default(&request.date_from, DEFAULT_REPORT_FROM),
        or_default(&request.date_to, DEFAULT_REPORT_TO),
    )
}

pub fn waste_report(request: &ReportRequest) -> String {
    let (from, to) = report_period(request);
    format!(
        "Write a professional waste segregation report titled \"Waste Segregation Report\" covering \
         the period from {from} to {to}. Use these five sections, each introduced by its heading on \
         its own line:\n\
         1. Executive Summary\n\
         2. Waste Streams Collected\n\
         3. Segregation Quality and Contamination\n\
         4. Environmental Impact (CO2 avoided, landfill diversion)\n\
         5. Recommendations\n\
         Length: 300-400 words. Output plain text only. Do not use Markdown, asterisks, hashes or \
         bullet symbols."
    )
}
