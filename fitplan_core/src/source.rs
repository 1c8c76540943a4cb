//! Plan sources: where candidate exercises come from.
//!
//! The selector only needs candidates for a (group, level) pair. The
//! built-in [`Catalog`] serves them by reference; [`GenerativeSource`]
//! asks a text-generation model for them and parses the JSON it returns.

use crate::catalog::category_description;
use crate::{Catalog, Error, Exercise, Level, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::borrow::Cow;

/// Anything that can supply candidate exercises for plan selection
pub trait PlanSource {
    /// Candidates for `(group, level)`
    ///
    /// `Ok(None)` means the pair is unknown to this source. An empty list
    /// means it is known but has nothing to offer.
    fn candidates(&self, group: &str, level: Level) -> Result<Option<Cow<'_, [Exercise]>>>;
}

impl PlanSource for Catalog {
    fn candidates(&self, group: &str, level: Level) -> Result<Option<Cow<'_, [Exercise]>>> {
        Ok(self.lookup(group, level).map(Cow::Borrowed))
    }
}

impl<S: PlanSource + ?Sized> PlanSource for &S {
    fn candidates(&self, group: &str, level: Level) -> Result<Option<Cow<'_, [Exercise]>>> {
        (**self).candidates(group, level)
    }
}

// ============================================================================
// Generative Source
// ============================================================================

/// A hosted text-generation model, reduced to prompt in, text out
pub trait TextGenerator {
    fn complete(&self, prompt: &str) -> Result<String>;
}

/// Matches a fenced ```json block holding an array, or else the first bare array
static JSON_ARRAY_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(\[.*?\])\s*```|(\[.*?\])").ok());

/// Exercise record as the model is asked to produce it
#[derive(Debug, Deserialize)]
struct GeneratedExercise {
    #[serde(default)]
    name: String,
    #[serde(default, alias = "duration_seconds")]
    duration: f64,
    #[serde(default)]
    description: String,
}

/// Plan source backed by a text-generation model
///
/// The model is asked for a JSON array of `{name, duration, description}`
/// objects sized for `duration_minutes`; the selector then packs those
/// candidates exactly as it would catalog entries.
pub struct GenerativeSource<G> {
    generator: G,
    duration_minutes: u32,
    category: Option<String>,
}

impl<G: TextGenerator> GenerativeSource<G> {
    pub fn new(generator: G, duration_minutes: u32) -> Self {
        Self {
            generator,
            duration_minutes,
            category: None,
        }
    }

    /// Mention the group's category (and its description) in the prompt
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Build the request sent to the model
    pub fn prompt(&self, group: &str, level: Level) -> String {
        let level_name = level.as_str();
        let mut prompt = format!(
            "Create a detailed {}-minute {} workout plan for a {} level fitness enthusiast.\n",
            self.duration_minutes, group, level_name
        );

        if let Some(ref category) = self.category {
            match category_description(category) {
                Some(description) => prompt.push_str(&format!(
                    "The workout belongs to the {} category: {}\n",
                    category, description
                )),
                None => prompt.push_str(&format!(
                    "The workout belongs to the {} category.\n",
                    category
                )),
            }
        }

        prompt.push_str(
            "\nFormat the response as a JSON array with the following structure:\n\
             [\n  {\n    \"name\": \"Exercise Name\",\n    \"duration\": duration_in_seconds (integer),\n    \"description\": \"Detailed exercise description\"\n  }\n]\n\n",
        );
        prompt.push_str(&format!(
            "Include appropriate exercises for the {} level, with durations that total approximately {} minutes.\n",
            level_name, self.duration_minutes
        ));
        prompt.push_str("Include brief 15-second rests between exercises in your planning but don't include them in the JSON.\n");
        prompt.push_str("Each exercise should have a duration between 30-120 seconds depending on difficulty.\n");
        prompt.push_str("Provide clear, concise descriptions that explain proper form and execution.\n");
        prompt
    }
}

impl<G: TextGenerator> PlanSource for GenerativeSource<G> {
    fn candidates(&self, group: &str, level: Level) -> Result<Option<Cow<'_, [Exercise]>>> {
        let prompt = self.prompt(group, level);
        tracing::info!("Requesting generated {} plan for '{}'", level, group);

        let response = self.generator.complete(&prompt)?;
        let exercises = parse_generated_plan(&response)?;

        tracing::info!("Model proposed {} usable exercises", exercises.len());
        Ok(Some(Cow::Owned(exercises)))
    }
}

/// Extract and parse the exercise array from a model response
///
/// A fenced ```json block wins over a bare array. Entries with an empty
/// name or a zero duration are dropped.
pub fn parse_generated_plan(response: &str) -> Result<Vec<Exercise>> {
    let pattern = JSON_ARRAY_PATTERN
        .as_ref()
        .ok_or_else(|| Error::Other("JSON array pattern failed to compile".into()))?;

    let captures = pattern
        .captures(response)
        .ok_or_else(|| Error::Source("Could not find a workout plan in the model response".into()))?;
    let json = captures
        .get(1)
        .or_else(|| captures.get(2))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::Source("Could not find a workout plan in the model response".into()))?;

    let generated: Vec<GeneratedExercise> = serde_json::from_str(json)
        .map_err(|e| Error::Source(format!("Malformed workout plan JSON: {}", e)))?;

    let exercises = generated
        .into_iter()
        .filter_map(|g| {
            let name = g.name.trim();
            let seconds = g.duration.round();
            if name.is_empty() || !seconds.is_finite() || seconds < 1.0 {
                tracing::warn!(
                    "Ignoring generated exercise '{}' with duration {}",
                    g.name,
                    g.duration
                );
                return None;
            }
            // Float to int casts saturate at u32::MAX
            Some(Exercise::new(name, seconds as u32, g.description))
        })
        .collect();

    Ok(exercises)
}
