//! Converts raw provider records into the canonical [`RecipeDetail`] shape.
//!
//! Records that cannot satisfy the "ingredients and instructions both
//! present" invariant are dropped rather than reported: absence from the
//! result list is the signal.

use log::debug;

use crate::model::{IngredientLine, InstructionSource, RawDetail, RawIngredient, RecipeDetail};

/// Derive normalized ingredient lines from the raw provider list.
///
/// Per entry: `name` is the structured name when non-empty, else the
/// trimmed alternate name; `amount` survives only when numeric-typed;
/// `original` is the provided line or, failing that, synthesized from
/// amount, unit and name joined by single spaces. Entries whose `original`
/// is empty after trimming carry no usable information and are excluded.
pub fn normalize_ingredients(raw: &[RawIngredient]) -> Vec<IngredientLine> {
    raw.iter()
        .filter_map(|ing| {
            let name = ing
                .name
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .or_else(|| {
                    ing.original_name
                        .as_deref()
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                })
                .unwrap_or_default()
                .to_string();

            let unit = ing
                .unit
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string);

            let original = match ing.original.as_deref().map(str::trim) {
                Some(text) if !text.is_empty() => text.to_string(),
                _ => synthesize_original(ing.amount, unit.as_deref(), &name),
            };

            if original.is_empty() {
                return None;
            }

            Some(IngredientLine {
                name,
                amount: ing.amount,
                unit,
                original,
            })
        })
        .collect()
}

/// Build a human-readable line from the structured fields.
///
/// A numeric amount of zero is kept ("0 g salt" keeps its amount); the
/// upstream data occasionally carries legitimate zero quantities.
fn synthesize_original(amount: Option<f64>, unit: Option<&str>, name: &str) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);
    if let Some(amount) = amount {
        parts.push(amount.to_string());
    }
    if let Some(unit) = unit {
        parts.push(unit.to_string());
    }
    if !name.is_empty() {
        parts.push(name.to_string());
    }
    parts.join(" ")
}

/// Build a single instructions string from either representation.
///
/// The flat field wins when it has content; otherwise structured step
/// groups are flattened into newline-joined lines, each prefixed with
/// `"{number}. "` when the step carries a number. Returns an empty string
/// when neither source yields usable text.
pub fn normalize_instructions(raw: &RawDetail) -> String {
    match raw.instruction_source() {
        InstructionSource::Flat(text) => text.to_string(),
        InstructionSource::Steps(groups) => {
            let mut lines = Vec::new();
            for group in groups {
                for step in &group.steps {
                    let text = step.step.as_deref().map(str::trim).unwrap_or_default();
                    if text.is_empty() {
                        continue;
                    }
                    match step.number {
                        Some(number) => lines.push(format!("{}. {}", number, text)),
                        None => lines.push(text.to_string()),
                    }
                }
            }
            lines.join("\n").trim().to_string()
        }
        InstructionSource::Missing => String::new(),
    }
}

/// Normalize one raw detail record, or drop it.
///
/// Returns `None` when the record cannot yield both a non-empty ingredient
/// list and non-empty instructions; every `RecipeDetail` this function
/// emits is cookable.
pub fn to_recipe_detail(raw: RawDetail) -> Option<RecipeDetail> {
    let ingredients = normalize_ingredients(&raw.extended_ingredients);
    let instructions = normalize_instructions(&raw);

    if ingredients.is_empty() || instructions.is_empty() {
        debug!(
            "dropping recipe {}: ingredients={} instructions_len={}",
            raw.id,
            ingredients.len(),
            instructions.len()
        );
        return None;
    }

    Some(RecipeDetail {
        id: raw.id,
        title: raw.title,
        image: raw.image,
        source_url: raw.source_url,
        ready_in_minutes: raw.ready_in_minutes,
        servings: raw.servings,
        ingredients,
        instructions,
    })
}
