//! Guided-session script and timeline for a generated plan.
//!
//! The script is the spoken/printed walkthrough of a plan; the timeline
//! splits it into exercise and rest segments for the guided timer.

use crate::selector::REST_SECONDS;
use crate::{Exercise, WorkoutPlan};

/// Longest text handed to a text-to-speech engine, in characters
pub const SPEECH_CHAR_LIMIT: usize = 3000;

/// Render the guided instructions for a plan
pub fn instructions(plan: &WorkoutPlan) -> String {
    let mut text = format!(
        "Welcome to your {} minute {} workout. ",
        plan.duration_minutes, plan.group
    );
    text.push_str(&format!(
        "This {} level workout includes {} exercises. Let's begin!\n\n",
        plan.level.as_str(),
        plan.len()
    ));

    for (i, exercise) in plan.iter().enumerate() {
        text.push_str(&format!(
            "Exercise {}: {} for {} seconds.",
            i + 1,
            exercise.name,
            exercise.duration_seconds
        ));
        let description = exercise.description.trim().trim_end_matches('.');
        if !description.is_empty() {
            text.push_str(&format!(" {}.", description));
        }
        text.push('\n');
        if i + 1 < plan.len() {
            text.push_str(&format!("Then rest for {} seconds.\n\n", REST_SECONDS));
        }
    }

    text.push_str(&format!(
        "\nCongratulations on completing your {} workout!",
        plan.group
    ));
    text
}

/// Trim text to [`SPEECH_CHAR_LIMIT`] characters for speech synthesis
pub fn speech_text(text: &str) -> &str {
    match text.char_indices().nth(SPEECH_CHAR_LIMIT) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// One stretch of the guided session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Exercise {
        index: usize,
        exercise: &'a Exercise,
        start_seconds: u64,
    },
    Rest {
        start_seconds: u64,
    },
}

impl Segment<'_> {
    pub fn start_seconds(&self) -> u64 {
        match self {
            Segment::Exercise { start_seconds, .. } | Segment::Rest { start_seconds } => {
                *start_seconds
            }
        }
    }

    pub fn duration_seconds(&self) -> u64 {
        match self {
            Segment::Exercise { exercise, .. } => u64::from(exercise.duration_seconds),
            Segment::Rest { .. } => u64::from(REST_SECONDS),
        }
    }
}

/// Exercise and rest segments in order, with no rest after the last exercise
pub fn timeline(plan: &WorkoutPlan) -> Vec<Segment<'_>> {
    let mut segments = Vec::with_capacity(plan.len() * 2);
    let mut offset: u64 = 0;

    for (index, exercise) in plan.iter().enumerate() {
        if index > 0 {
            segments.push(Segment::Rest {
                start_seconds: offset,
            });
            offset += u64::from(REST_SECONDS);
        }
        segments.push(Segment::Exercise {
            index,
            exercise,
            start_seconds: offset,
        });
        offset += u64::from(exercise.duration_seconds);
    }

    segments
}

/// Fraction of the session completed, clamped to `0.0..=1.0`
pub fn progress(elapsed_seconds: u64, total_seconds: u64) -> f64 {
    if total_seconds == 0 {
        return 1.0;
    }
    (elapsed_seconds as f64 / total_seconds as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    fn sample_plan() -> WorkoutPlan {
        WorkoutPlan {
            group: "Hatha Yoga".into(),
            level: Level::Beginner,
            duration_minutes: 5,
            exercises: vec![
                Exercise::new("Mountain Pose", 60, "Stand tall."),
                Exercise::new("Cat-Cow", 90, "Move with the breath"),
            ],
        }
    }

    #[test]
    fn test_instructions_text() {
        let text = instructions(&sample_plan());
        assert!(text.starts_with("Welcome to your 5 minute Hatha Yoga workout. "));
        assert!(text.contains("This beginner level workout includes 2 exercises."));
        assert!(text.contains("Exercise 1: Mountain Pose for 60 seconds. Stand tall.\n"));
        assert!(text.contains("Exercise 2: Cat-Cow for 90 seconds. Move with the breath.\n"));
        assert_eq!(text.matches("Then rest for 15 seconds.").count(), 1);
        assert!(text.ends_with("Congratulations on completing your Hatha Yoga workout!"));
    }

    #[test]
    fn test_instructions_without_description() {
        let mut plan = sample_plan();
        plan.exercises[0].description.clear();
        let text = instructions(&plan);
        assert!(text.contains("Exercise 1: Mountain Pose for 60 seconds.\n"));
    }

    #[test]
    fn test_speech_text_truncates_on_char_boundary() {
        let long = "é".repeat(SPEECH_CHAR_LIMIT + 10);
        let trimmed = speech_text(&long);
        assert_eq!(trimmed.chars().count(), SPEECH_CHAR_LIMIT);

        let short = "Breathe in.";
        assert_eq!(speech_text(short), short);
    }

    #[test]
    fn test_timeline_alternates_without_trailing_rest() {
        let plan = sample_plan();
        let segments = timeline(&plan);
        assert_eq!(segments.len(), 3);
        assert!(matches!(segments[0], Segment::Exercise { index: 0, start_seconds: 0, .. }));
        assert_eq!(segments[1], Segment::Rest { start_seconds: 60 });
        assert!(matches!(segments[2], Segment::Exercise { index: 1, start_seconds: 75, .. }));

        let last = segments.last().unwrap();
        assert_eq!(last.start_seconds() + last.duration_seconds(), plan.total_seconds());
    }

    #[test]
    fn test_timeline_of_empty_plan() {
        let mut plan = sample_plan();
        plan.exercises.clear();
        assert!(timeline(&plan).is_empty());
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(progress(0, 100), 0.0);
        assert_eq!(progress(50, 100), 0.5);
        assert_eq!(progress(150, 100), 1.0);
        assert_eq!(progress(0, 0), 1.0);
    }
}
