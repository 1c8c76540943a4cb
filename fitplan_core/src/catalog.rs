//! Exercise catalog: the built-in table and external catalog files.
//!
//! The catalog maps a workout group (e.g. "Box Breathing") and a [`Level`]
//! to an ordered list of exercises. It is built once and only read during
//! plan generation.

use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Cached default catalog - built once and shared by every caller
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with the built-in exercise table
///
/// **Note**: For production use, prefer `default_catalog()` which returns a
/// cached reference. This function is retained for tests that need an
/// owned catalog.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

/// Short descriptions of the workout categories
const CATEGORY_DESCRIPTIONS: &[(&str, &str)] = &[
    ("Yoga", "Ancient practice focusing on strength, flexibility and breathing"),
    ("Breathing Exercises", "Techniques to improve lung capacity and reduce stress"),
    ("Modern Abs Workout", "Contemporary exercises targeting core strength"),
    ("Body Part Focus", "Targeted exercises for specific body areas"),
    ("Meditation & Mindfulness", "Practices to improve mental clarity and presence"),
];

/// Description for a known category name
pub fn category_description(category: &str) -> Option<&'static str> {
    CATEGORY_DESCRIPTIONS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, description)| *description)
}

/// (name, duration in seconds, description)
type Row = (&'static str, u32, &'static str);

fn build_default_catalog_internal() -> Catalog {
    let mut catalog = Catalog::default();

    // ========================================================================
    // Breathing Exercises
    // ========================================================================

    let breathing = "Breathing Exercises";

    catalog.insert_rows(breathing, "Box Breathing", Level::Beginner, &[
        ("Settling Breath", 120, "Sit tall, breathe naturally through the nose and notice the rhythm of each breath."),
        ("Box Breath 4-4-4-4", 120, "Inhale for 4, hold for 4, exhale for 4, hold for 4. Keep the shoulders relaxed."),
        ("Extended Box Breath", 180, "Repeat the 4-count box, letting each side of the box feel smooth and even."),
        ("Hand-Traced Box", 120, "Trace a square in the air with one finger, one side per phase of the breath."),
        ("Quiet Recovery Breath", 180, "Release the count and breathe slowly, lengthening each exhale."),
    ]);
    catalog.insert_rows(breathing, "Box Breathing", Level::Intermediate, &[
        ("Box Breath 5-5-5-5", 150, "Inhale, hold, exhale and hold for 5 counts each without straining."),
        ("Walking Box Breath", 180, "Walk slowly, matching one step to each count of the box."),
        ("Box Breath 6-6-6-6", 180, "Lengthen every phase to 6 counts, keeping the breath silent."),
        ("Body Scan Box", 120, "Keep the 5-count box while moving attention from feet to head."),
    ]);
    catalog.insert_rows(breathing, "Box Breathing", Level::Advanced, &[
        ("Box Breath 8-8-8-8", 240, "Slow each phase to 8 counts. Shorten the holds if you feel air hunger."),
        ("Standing Box Hold", 180, "Stand in mountain pose and hold a 6-count box breath without fidgeting."),
        ("Asymmetric Box", 180, "Inhale 4, hold 7, exhale 8, hold 4. Keep the exhale steady."),
        ("Silent Counting Box", 240, "Drop the finger tracing and keep a 7-count box purely by internal rhythm."),
    ]);

    catalog.insert_rows(breathing, "Diaphragmatic Breathing", Level::Beginner, &[
        ("Belly Breathing Lying Down", 120, "Lie on your back with a hand on your belly and let it rise on each inhale."),
        ("Seated Belly Breath", 90, "Sit upright and breathe into the lower ribs, keeping the chest still."),
        ("Sighing Exhale", 60, "Inhale through the nose, then let the breath out through the mouth with a soft sigh."),
        ("Counted Belly Breath", 120, "Inhale for 4 counts into the belly and exhale for 6 counts."),
    ]);
    catalog.insert_rows(breathing, "Diaphragmatic Breathing", Level::Intermediate, &[
        ("Book on Belly", 120, "Lie down with a light book on the belly and raise it slowly with each inhale."),
        ("Side-Rib Expansion", 90, "Place hands on the sides of the ribs and breathe into them laterally."),
        ("Paced 5-5 Breathing", 180, "Inhale for 5, exhale for 5, keeping the motion in the diaphragm."),
        ("Standing Belly Breath", 90, "Stand tall with soft knees and keep belly breathing while upright."),
    ]);
    catalog.insert_rows(breathing, "Diaphragmatic Breathing", Level::Advanced, &[
        ("Resonance Breathing", 240, "Breathe at about six breaths per minute, 5 counts in and 5 counts out."),
        ("Crocodile Breath", 180, "Lie face down, forehead on hands, and feel the lower back rise with each inhale."),
        ("Extended Exhale 4-8", 180, "Inhale for 4 and exhale for 8 through pursed lips."),
        ("Walking Diaphragm Breath", 150, "Walk at an easy pace while keeping the breath low and slow."),
    ]);

    catalog.insert_rows(breathing, "Alternate Nostril Breathing", Level::Beginner, &[
        ("Nostril Awareness", 60, "Breathe normally and notice which nostril feels more open."),
        ("Single-Side Breathing", 90, "Close the right nostril and breathe through the left, then switch."),
        ("Nadi Shodhana Basics", 120, "Inhale left, exhale right, inhale right, exhale left. Keep it gentle."),
    ]);
    catalog.insert_rows(breathing, "Alternate Nostril Breathing", Level::Intermediate, &[
        ("Counted Nadi Shodhana", 180, "Alternate nostrils with a 4-count inhale and 4-count exhale."),
        ("Nadi Shodhana with Pause", 150, "Add a brief pause after each inhale before switching sides."),
        ("Closing Breath", 60, "Release the hand and take three slow breaths through both nostrils."),
    ]);
    catalog.insert_rows(breathing, "Alternate Nostril Breathing", Level::Advanced, &[
        ("Nadi Shodhana 4-8-8", 240, "Inhale 4, retain 8, exhale 8, alternating sides each round."),
        ("Surya Bhedana", 120, "Inhale only through the right nostril and exhale through the left."),
        ("Chandra Bhedana", 120, "Inhale only through the left nostril and exhale through the right."),
    ]);

    // ========================================================================
    // Yoga
    // ========================================================================

    let yoga = "Yoga";

    catalog.insert_rows(yoga, "Hatha Yoga", Level::Beginner, &[
        ("Mountain Pose", 60, "Stand with feet hip-width apart, weight even, crown lifting toward the ceiling."),
        ("Cat-Cow", 90, "On hands and knees, alternate arching and rounding the spine with the breath."),
        ("Child's Pose", 60, "Sit back on the heels with arms extended and forehead resting down."),
        ("Seated Forward Fold", 90, "Sit with legs extended and hinge forward from the hips, knees soft."),
        ("Supported Bridge", 60, "Lie on your back and lift the hips, keeping the knees over the ankles."),
    ]);
    catalog.insert_rows(yoga, "Hatha Yoga", Level::Intermediate, &[
        ("Warrior II", 90, "Front knee over the ankle, arms wide, gaze over the front fingertips."),
        ("Triangle Pose", 90, "Straight legs, reach forward then tip down, stacking the shoulders."),
        ("Downward Dog", 60, "Press the floor away and lift the hips, heels reaching down."),
        ("Tree Pose", 60, "Balance on one leg with the other foot on the calf or thigh."),
        ("Bridge Pose", 60, "Lift the hips and roll the shoulders under, pressing through the feet."),
    ]);
    catalog.insert_rows(yoga, "Hatha Yoga", Level::Advanced, &[
        ("Half Moon", 90, "Balance on one leg with the body open to the side and the top arm reaching up."),
        ("Crow Pose", 60, "Place knees on the backs of the upper arms and shift forward to balance."),
        ("Wheel Pose", 60, "Press up from the back into a full backbend, arms and legs straight."),
        ("Headstand Prep", 90, "Forearms down, walk the feet in and lift the hips over the shoulders."),
        ("Seated Twist", 60, "Cross one foot over the opposite knee and twist from the base of the spine."),
    ]);

    catalog.insert_rows(yoga, "Vinyasa Flow", Level::Beginner, &[
        ("Half Sun Salutation", 90, "Reach up, fold forward, halfway lift and fold again, linking each move to a breath."),
        ("Low Lunge Flow", 90, "Step back to a low lunge, lift the arms, then return and switch sides."),
        ("Knees-Chest-Chin", 60, "From plank lower the knees, chest and chin to the floor, then press back."),
        ("Cobra Flow", 60, "Lift into a small cobra on the inhale and lower on the exhale."),
    ]);
    catalog.insert_rows(yoga, "Vinyasa Flow", Level::Intermediate, &[
        ("Sun Salutation A", 120, "Move through the classic sequence with one breath per movement."),
        ("Warrior Flow", 120, "Flow between Warrior I, Warrior II and Reverse Warrior on each side."),
        ("Chaturanga Practice", 60, "Lower halfway from plank with elbows hugging the ribs."),
        ("Chair Twist Flow", 90, "Sink into chair pose and twist side to side with the breath."),
    ]);
    catalog.insert_rows(yoga, "Vinyasa Flow", Level::Advanced, &[
        ("Sun Salutation B", 180, "Add chair pose and Warrior I to the salutation, moving continuously."),
        ("Side Plank Flow", 90, "Rotate from plank into side plank on each side with control."),
        ("Jump-Through Practice", 60, "From downward dog float the legs through the arms to sit."),
        ("Standing Balance Flow", 120, "Link Warrior III, Half Moon and Standing Split without touching down."),
    ]);

    // ========================================================================
    // Body Part Focus
    // ========================================================================

    let body = "Body Part Focus";

    catalog.insert_rows(body, "Upper Body", Level::Beginner, &[
        ("Wall Push-ups", 45, "Hands on the wall at shoulder height, lower the chest toward the wall and press back."),
        ("Arm Circles", 30, "Extend the arms and draw small circles, reversing halfway."),
        ("Doorway Chest Stretch", 45, "Forearms on the door frame, step through gently to open the chest."),
        ("Band Pull-Aparts", 45, "Hold a band at shoulder height and pull it apart, squeezing the shoulder blades."),
    ]);
    catalog.insert_rows(body, "Upper Body", Level::Intermediate, &[
        ("Push-ups", 60, "Body in a straight line, lower until the chest nearly touches and press up."),
        ("Pike Push-ups", 45, "Hips high, bend the elbows to bring the head toward the floor."),
        ("Plank Shoulder Taps", 45, "From plank tap each shoulder with the opposite hand, hips still."),
        ("Chair Dips", 45, "Hands on a chair behind you, lower by bending the elbows and press up."),
    ]);
    catalog.insert_rows(body, "Upper Body", Level::Advanced, &[
        ("Decline Push-ups", 60, "Feet elevated, keep the core braced through each rep."),
        ("Archer Push-ups", 60, "Shift the weight over one arm as you lower, alternating sides."),
        ("Pseudo Planche Lean", 45, "Hands turned out by the hips, lean forward past the wrists and hold."),
        ("Pull-ups", 60, "Hang with straight arms and pull the chest to the bar with control."),
    ]);

    catalog.insert_rows(body, "Lower Body", Level::Beginner, &[
        ("Bodyweight Squats", 45, "Feet shoulder-width apart, sit back and down, then stand tall."),
        ("Glute Bridges", 45, "Lie on your back and drive through the heels to lift the hips."),
        ("Standing Calf Raises", 30, "Rise onto the balls of the feet and lower slowly."),
        ("Side-Lying Leg Raises", 45, "Lie on one side and lift the top leg with the toes pointing forward."),
    ]);
    catalog.insert_rows(body, "Lower Body", Level::Intermediate, &[
        ("Reverse Lunges", 60, "Step back into a lunge, both knees at ninety degrees, and return."),
        ("Wall Sit", 60, "Slide down the wall until the thighs are parallel and hold."),
        ("Single-Leg Glute Bridge", 45, "Lift the hips with one leg extended, switching halfway."),
        ("Sumo Squats", 45, "Wide stance with toes out, sink the hips straight down."),
    ]);
    catalog.insert_rows(body, "Lower Body", Level::Advanced, &[
        ("Jump Squats", 45, "Squat down and explode upward, landing softly."),
        ("Bulgarian Split Squats", 60, "Rear foot on a bench, lower the back knee toward the floor."),
        ("Pistol Squat Negatives", 60, "Lower slowly on one leg to a box, switching legs halfway."),
        ("Skater Jumps", 45, "Leap side to side, landing on one foot each time."),
    ]);

    // ========================================================================
    // Modern Abs Workout
    // ========================================================================

    let abs = "Modern Abs Workout";

    catalog.insert_rows(abs, "Dynamic Modern Abs Workout", Level::Beginner, &[
        ("Dead Bug", 45, "On your back, extend the opposite arm and leg while the lower back stays down."),
        ("Forearm Plank", 30, "Elbows under shoulders, body straight from head to heels."),
        ("Crunches", 45, "Knees bent, curl the shoulders off the floor without pulling on the neck."),
        ("Bird Dog", 45, "On hands and knees, reach the opposite arm and leg long."),
    ]);
    catalog.insert_rows(abs, "Dynamic Modern Abs Workout", Level::Intermediate, &[
        ("Bicycle Crunches", 45, "Bring the elbow toward the opposite knee while the other leg extends."),
        ("Side Plank", 45, "Stack the feet and lift the hips, switching sides halfway."),
        ("Mountain Climbers", 45, "From plank, drive the knees toward the chest at a steady pace."),
        ("Hollow Body Hold", 30, "Arms overhead and legs low, press the lower back into the floor."),
    ]);
    catalog.insert_rows(abs, "Dynamic Modern Abs Workout", Level::Advanced, &[
        ("V-ups", 45, "Lift the legs and torso together to touch the toes at the top."),
        ("Dragon Flag Negatives", 45, "Hold a bench behind the head and lower the straight body slowly."),
        ("Hanging Knee Raises", 45, "Hang from a bar and lift the knees to the chest without swinging."),
        ("Plank to Pike", 45, "From plank pike the hips up high, then return under control."),
    ]);

    // ========================================================================
    // Meditation & Mindfulness
    // ========================================================================

    let meditation = "Meditation & Mindfulness";

    catalog.insert_rows(meditation, "Gentle Meditation & Mindfulness", Level::Beginner, &[
        ("Arrival", 60, "Sit comfortably, close the eyes and notice the points of contact with the floor."),
        ("Breath Counting", 120, "Count each exhale from one to ten, then start again."),
        ("Body Scan", 180, "Move attention slowly from the toes to the crown, softening any tension."),
    ]);
    catalog.insert_rows(meditation, "Gentle Meditation & Mindfulness", Level::Intermediate, &[
        ("Open Awareness", 180, "Let sounds, sensations and thoughts come and go without following them."),
        ("Loving-Kindness", 180, "Silently repeat wishes of ease and safety for yourself and others."),
        ("Walking Meditation", 120, "Walk slowly, noting the lift, move and place of each foot."),
    ]);
    catalog.insert_rows(meditation, "Gentle Meditation & Mindfulness", Level::Advanced, &[
        ("Noting Practice", 240, "Label each experience softly, such as hearing, thinking or feeling."),
        ("Choiceless Awareness", 240, "Rest in awareness itself without choosing an object."),
        ("Silent Sitting", 180, "Sit without technique, returning to stillness whenever the mind wanders."),
    ]);

    catalog
}

impl Catalog {
    fn insert_rows(&mut self, category: &str, group: &str, level: Level, rows: &[Row]) {
        let exercises = rows
            .iter()
            .map(|(name, secs, desc)| Exercise::new(*name, *secs, *desc))
            .collect();
        let entry = self.groups.entry(group.to_string()).or_default();
        entry.category = category.to_string();
        entry.levels.insert(level, exercises);
    }

    /// Candidate exercises for a (group, level) pair, in catalog order
    ///
    /// Returns `None` when the group is unknown or has no entry for the
    /// level. An empty slice means the entry exists but holds nothing.
    pub fn lookup(&self, group: &str, level: Level) -> Option<&[Exercise]> {
        self.groups
            .get(group.trim())
            .and_then(|entry| entry.levels.get(&level))
            .map(Vec::as_slice)
    }

    /// Group names in sorted order
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Levels available for a group
    pub fn levels(&self, group: &str) -> Vec<Level> {
        self.groups
            .get(group.trim())
            .map(|entry| entry.levels.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Groups arranged under their category, both sorted
    pub fn categories(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut categories: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (group, entry) in &self.groups {
            categories
                .entry(entry.category.as_str())
                .or_default()
                .push(group.as_str());
        }
        categories
    }

    /// Load a catalog from a TOML file of flat `[[exercise]]` records
    ///
    /// Records keep their file order within each (group, level). Invalid
    /// files are rejected as a whole.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&contents)?;
        tracing::info!(
            "Loaded catalog with {} groups from {:?}",
            catalog.groups.len(),
            path
        );
        Ok(catalog)
    }

    /// Parse a catalog from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(contents)?;
        let mut catalog = Catalog::default();

        for (idx, record) in file.exercises.into_iter().enumerate() {
            let level: Level = record.level.parse().map_err(|_| {
                Error::CatalogValidation(format!(
                    "exercise #{} ('{}') has unknown level '{}'",
                    idx + 1,
                    record.name,
                    record.level
                ))
            })?;

            let entry = catalog
                .groups
                .entry(record.group.trim().to_string())
                .or_default();
            if entry.category.is_empty() {
                entry.category = record.category;
            }
            entry.levels.entry(level).or_default().push(Exercise {
                name: record.name,
                duration_seconds: record.duration_seconds,
                description: record.description,
            });
        }

        let errors = catalog.validate();
        if !errors.is_empty() {
            return Err(Error::CatalogValidation(errors.join("; ")));
        }

        Ok(catalog)
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.groups.is_empty() {
            errors.push("Catalog has no groups".to_string());
        }

        for (group, entry) in &self.groups {
            if group.is_empty() {
                errors.push("Catalog has a group with an empty name".to_string());
            }
            if entry.levels.is_empty() {
                errors.push(format!("Group '{}' has no levels", group));
            }

            for (level, exercises) in &entry.levels {
                if exercises.is_empty() {
                    errors.push(format!("Group '{}' has no {} exercises", group, level));
                }
                for exercise in exercises {
                    if exercise.name.trim().is_empty() {
                        errors.push(format!(
                            "Group '{}' ({}) has an exercise with an empty name",
                            group, level
                        ));
                    }
                    if exercise.duration_seconds == 0 {
                        errors.push(format!(
                            "Group '{}' ({}): '{}' has zero duration",
                            group, level, exercise.name
                        ));
                    }
                }
            }
        }

        errors
    }
}

/// On-disk catalog format
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "exercise")]
    exercises: Vec<CatalogRecord>,
}

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    #[serde(default)]
    category: String,
    group: String,
    level: String,
    name: String,
    duration_seconds: u32,
    #[serde(default)]
    description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_every_group_has_all_levels() {
        let catalog = build_default_catalog();
        for group in catalog.groups() {
            assert_eq!(catalog.levels(group), Level::ALL.to_vec(), "group {}", group);
        }
    }

    #[test]
    fn test_box_breathing_beginner_durations() {
        let catalog = default_catalog();
        let durations: Vec<u32> = catalog
            .lookup("Box Breathing", Level::Beginner)
            .unwrap()
            .iter()
            .map(|e| e.duration_seconds)
            .collect();
        assert_eq!(durations, vec![120, 120, 180, 120, 180]);
    }

    #[test]
    fn test_lookup_unknown_group() {
        let catalog = default_catalog();
        assert!(catalog.lookup("Tap Dancing", Level::Beginner).is_none());
    }

    #[test]
    fn test_lookup_trims_group_name() {
        let catalog = default_catalog();
        assert!(catalog.lookup("  Hatha Yoga ", Level::Advanced).is_some());
    }

    #[test]
    fn test_categories_cover_every_group() {
        let catalog = default_catalog();
        let listed: usize = catalog.categories().values().map(Vec::len).sum();
        assert_eq!(listed, catalog.groups.len());
        assert!(catalog.categories().contains_key("Breathing Exercises"));
    }

    #[test]
    fn test_built_in_categories_have_descriptions() {
        let catalog = default_catalog();
        for category in catalog.categories().keys() {
            assert!(category_description(category).is_some(), "{}", category);
        }
        assert!(category_description("Tap Dancing").is_none());
    }

    #[test]
    fn test_every_described_category_has_groups() {
        let catalog = default_catalog();
        let categories = catalog.categories();
        for (category, _) in CATEGORY_DESCRIPTIONS {
            assert!(categories.contains_key(category), "{} has no groups", category);
        }
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("catalog.toml");
        std::fs::write(
            &path,
            r#"
[[exercise]]
category = "Dance"
group = "Tap Dancing"
level = "Beginner"
name = "Shuffle"
duration_seconds = 60
description = "Brush forward and back."

[[exercise]]
group = "Tap Dancing"
level = "beginner"
name = "Flap"
duration_seconds = 45
"#,
        )
        .unwrap();

        let catalog = Catalog::load_from(&path).unwrap();
        let exercises = catalog.lookup("Tap Dancing", Level::Beginner).unwrap();
        assert_eq!(exercises.len(), 2);
        assert_eq!(exercises[0].name, "Shuffle");
        assert_eq!(exercises[1].description, "");
        assert_eq!(catalog.groups["Tap Dancing"].category, "Dance");
    }

    #[test]
    fn test_load_rejects_unknown_level() {
        let toml_str = r#"
[[exercise]]
group = "Tap Dancing"
level = "expert"
name = "Wings"
duration_seconds = 30
"#;
        let err = Catalog::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, Error::CatalogValidation(_)));
    }

    #[test]
    fn test_load_rejects_zero_duration() {
        let toml_str = r#"
[[exercise]]
group = "Tap Dancing"
level = "beginner"
name = "Pause"
duration_seconds = 0
"#;
        assert!(Catalog::from_toml_str(toml_str).is_err());
    }

    #[test]
    fn test_validate_reports_empty_level_list() {
        let mut catalog = Catalog::default();
        catalog
            .groups
            .entry("Box Breathing".into())
            .or_default()
            .levels
            .insert(Level::Beginner, vec![]);
        let errors = catalog.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("no Beginner exercises"));
    }
}
