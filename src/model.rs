use serde::{Deserialize, Deserializer, Serialize};

/// One hit from the upstream keyword search, prior to detail enrichment.
/// Lives only for the duration of the request that produced it.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchCandidate {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Envelope of the upstream keyword-search response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchCandidate>,
}

/// A normalized ingredient line. `original` is never empty: it is the
/// human-readable fallback when the structured fields are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub original: String,
}

/// The canonical recipe shape returned to callers and persisted on save.
/// Every value of this type is "cookable": `ingredients` is non-empty and
/// `instructions` is non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    pub ingredients: Vec<IngredientLine>,
    pub instructions: String,
}

/// Raw detail record from the bulk lookup. Every field except `id` may be
/// missing or empty; the normalizer decides what survives.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDetail {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub analyzed_instructions: Vec<RawStepGroup>,
    #[serde(default)]
    pub extended_ingredients: Vec<RawIngredient>,
}

/// The two ways the provider represents instructions. Resolved once in the
/// normalizer instead of branching throughout the pipeline.
#[derive(Debug)]
pub enum InstructionSource<'a> {
    /// Flat free-text instructions, already trimmed and non-empty.
    Flat(&'a str),
    /// Structured step groups to be flattened into numbered lines.
    Steps(&'a [RawStepGroup]),
    /// Neither representation carries usable text.
    Missing,
}

impl RawDetail {
    /// Pick the instruction representation to use: the flat field wins when
    /// it has content, structured steps are the fallback.
    pub fn instruction_source(&self) -> InstructionSource<'_> {
        if let Some(flat) = self.instructions.as_deref() {
            let flat = flat.trim();
            if !flat.is_empty() {
                return InstructionSource::Flat(flat);
            }
        }
        if !self.analyzed_instructions.is_empty() {
            return InstructionSource::Steps(&self.analyzed_instructions);
        }
        InstructionSource::Missing
    }
}

/// One group of structured instruction steps.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStepGroup {
    #[serde(default)]
    pub steps: Vec<RawStep>,
}

/// One structured instruction step.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStep {
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub step: Option<String>,
}

/// Raw ingredient entry with heterogeneous field presence. The provider
/// sometimes sends `amount` as a string or null; only numeric-typed values
/// are kept.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIngredient {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default, deserialize_with = "numeric_or_none")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

/// Deserialize a JSON value to `Some(f64)` only when it is numeric-typed;
/// strings, nulls and anything else collapse to `None`.
fn numeric_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_ingredient_numeric_amount() {
        let ing: RawIngredient =
            serde_json::from_str(r#"{"name":"pasta","amount":200,"unit":"g"}"#).unwrap();
        assert_eq!(ing.amount, Some(200.0));
    }

    #[test]
    fn test_raw_ingredient_string_amount_dropped() {
        let ing: RawIngredient =
            serde_json::from_str(r#"{"name":"pasta","amount":"200","unit":"g"}"#).unwrap();
        assert!(ing.amount.is_none());
    }

    #[test]
    fn test_raw_ingredient_all_fields_optional() {
        let ing: RawIngredient = serde_json::from_str("{}").unwrap();
        assert!(ing.name.is_none());
        assert!(ing.original.is_none());
    }

    #[test]
    fn test_raw_detail_tolerates_missing_fields() {
        let detail: RawDetail = serde_json::from_str(r#"{"id":111}"#).unwrap();
        assert_eq!(detail.id, 111);
        assert!(detail.extended_ingredients.is_empty());
        assert!(matches!(
            detail.instruction_source(),
            InstructionSource::Missing
        ));
    }

    #[test]
    fn test_instruction_source_prefers_flat() {
        let detail: RawDetail = serde_json::from_str(
            r#"{
                "id": 1,
                "instructions": "Boil water.",
                "analyzedInstructions": [{"steps": [{"number": 1, "step": "Ignore me"}]}]
            }"#,
        )
        .unwrap();
        assert!(matches!(
            detail.instruction_source(),
            InstructionSource::Flat("Boil water.")
        ));
    }

    #[test]
    fn test_instruction_source_blank_flat_falls_back_to_steps() {
        let detail: RawDetail = serde_json::from_str(
            r#"{
                "id": 1,
                "instructions": "   ",
                "analyzedInstructions": [{"steps": [{"number": 1, "step": "Chop"}]}]
            }"#,
        )
        .unwrap();
        assert!(matches!(
            detail.instruction_source(),
            InstructionSource::Steps(_)
        ));
    }
}
