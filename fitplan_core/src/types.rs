//! Core domain types for the workout planner.
//!
//! This module defines the fundamental types used throughout the system:
//! - Fitness levels
//! - Exercises and the plans assembled from them
//! - The catalog of exercises keyed by group and level

use crate::selector::REST_SECONDS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Level
// ============================================================================

/// Fitness difficulty tier
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[serde(alias = "Beginner")]
    Beginner,
    #[serde(alias = "Intermediate")]
    Intermediate,
    #[serde(alias = "Advanced")]
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

impl FromStr for Level {
    type Err = crate::Error;

    /// Case-insensitive: "Beginner", "beginner" and "BEGINNER" all parse.
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            other => Err(crate::Error::Other(format!(
                "Unknown level '{}' (expected beginner, intermediate or advanced)",
                other
            ))),
        }
    }
}

// ============================================================================
// Exercise and Plan
// ============================================================================

/// A single timed exercise
///
/// Exercises carry no identity beyond their fields; the same name may
/// appear under several levels with different durations.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
    #[serde(alias = "duration")]
    pub duration_seconds: u32,
    #[serde(default)]
    pub description: String,
}

impl Exercise {
    pub fn new(name: impl Into<String>, duration_seconds: u32, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration_seconds,
            description: description.into(),
        }
    }
}

/// One generated workout session
///
/// Every exercise except the last is followed by a rest gap of
/// [`REST_SECONDS`]. Plans live for a single render cycle and are never
/// persisted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutPlan {
    pub group: String,
    pub level: Level,
    pub duration_minutes: u32,
    pub exercises: Vec<Exercise>,
}

impl WorkoutPlan {
    /// Total session time: exercise durations plus the rests between them
    pub fn total_seconds(&self) -> u64 {
        let work: u64 = self
            .exercises
            .iter()
            .map(|e| u64::from(e.duration_seconds))
            .sum();
        let rests = self.exercises.len().saturating_sub(1) as u64 * u64::from(REST_SECONDS);
        work + rests
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Exercise> {
        self.exercises.iter()
    }
}

// ============================================================================
// Catalog Types
// ============================================================================

/// All exercises for one workout group, split by level
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GroupEntry {
    pub category: String,
    pub levels: BTreeMap<Level, Vec<Exercise>>,
}

/// The complete catalog of exercises, keyed by group then level
///
/// Read-only once built; plan generation only ever borrows from it.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub groups: BTreeMap<String, GroupEntry>,
}
