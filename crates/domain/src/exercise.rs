use derive_more::{Display, Into};
use log::debug;

use crate::{Name, NameError};

/// Minimum similarity for a raw name to be merged into an existing exercise.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Minimum similarity for two words to be considered the same word.
const WORD_SIMILARITY_THRESHOLD: f64 = 0.8;

#[derive(Debug, Display, Clone, Copy, Hash, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseKey(usize);

impl From<usize> for ExerciseKey {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// A logical exercise grouping all spellings judged equivalent.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub key: ExerciseKey,
    /// The first spelling seen for this exercise.
    pub name: Name,
    normalized: String,
}

/// Registry of canonical exercises, built incrementally while importing a log.
///
/// Keys are assigned in registration order. A raw name is compared against
/// all registered exercises and merged into the most similar one if the
/// similarity reaches the threshold. Ties go to the exercise registered first.
#[derive(Debug, Clone)]
pub struct ExerciseRegistry {
    exercises: Vec<Exercise>,
    threshold: f64,
}

impl Default for ExerciseRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl ExerciseRegistry {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            exercises: vec![],
            threshold,
        }
    }

    pub fn canonicalize(&mut self, raw_name: &str) -> Result<ExerciseKey, NameError> {
        Ok(self.canonicalize_name(&Name::new(raw_name)?))
    }

    pub fn canonicalize_name(&mut self, name: &Name) -> ExerciseKey {
        let normalized = normalize(name.as_ref());

        if let Some(key) = self.best_match(name, &normalized) {
            return key;
        }

        let key = ExerciseKey(self.exercises.len());
        debug!("registering exercise {key} as \"{name}\"");
        self.exercises.push(Exercise {
            key,
            name: name.clone(),
            normalized,
        });
        key
    }

    /// Find the exercise a name refers to without registering it.
    #[must_use]
    pub fn resolve(&self, raw_name: &str) -> Option<ExerciseKey> {
        let name = Name::new(raw_name).ok()?;
        self.best_match(&name, &normalize(name.as_ref()))
    }

    #[must_use]
    pub fn get(&self, key: ExerciseKey) -> Option<&Exercise> {
        self.exercises.get(key.0)
    }

    #[must_use]
    pub fn name(&self, key: ExerciseKey) -> Option<&Name> {
        self.get(key).map(|e| &e.name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    fn best_match(&self, name: &Name, normalized: &str) -> Option<ExerciseKey> {
        let mut best: Option<(ExerciseKey, f64)> = None;

        for exercise in &self.exercises {
            // Single characters are too ambiguous to be merged with anything longer.
            if name.is_single_char() != exercise.name.is_single_char() {
                continue;
            }
            let score = similarity(normalized, &exercise.normalized);
            if score >= self.threshold && best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((exercise.key, score));
            }
        }

        best.map(|(key, _)| key)
    }
}

/// Reduce an exercise name to lowercase words.
///
/// Parenthesized qualifiers like "(Barbell)" are removed and any punctuation
/// is treated as a word separator. A name consisting only of a qualifier is
/// kept as a whole.
#[must_use]
pub fn normalize(name: &str) -> String {
    let mut words = String::with_capacity(name.len());
    let mut depth = 0_usize;

    for c in name.chars() {
        match c {
            '(' | '[' => {
                depth += 1;
                words.push(' ');
            }
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                words.push(' ');
            }
            _ if depth > 0 => {}
            c if c.is_alphanumeric() => words.extend(c.to_lowercase()),
            _ => words.push(' '),
        }
    }

    let normalized = words.split_whitespace().collect::<Vec<_>>().join(" ");

    if normalized.is_empty() {
        name.trim().to_lowercase()
    } else {
        normalized
    }
}

/// Similarity of two normalized names in the range 0.0 to 1.0.
///
/// Names differing only in word separation or plural "s" endings are
/// identical. Otherwise this is
/// the Dice coefficient over words, where a word counts as shared with the
/// weight of its Damerau-Levenshtein similarity to the closest unused word of
/// the other name, if that similarity reaches 0.8. Words are additionally
/// compared without a plural "s".
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b || compact(a) == compact(b) || compact_singular(a) == compact_singular(b) {
        return 1.0;
    }

    let words_a = a.split_whitespace().collect::<Vec<_>>();
    let words_b = b.split_whitespace().collect::<Vec<_>>();

    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let mut used = vec![false; words_b.len()];
    let mut shared = 0.0;

    for word_a in &words_a {
        let mut best: Option<(usize, f64)> = None;
        for (i, word_b) in words_b.iter().enumerate() {
            if used[i] {
                continue;
            }
            let score = word_similarity(word_a, word_b);
            if score >= WORD_SIMILARITY_THRESHOLD
                && best.is_none_or(|(_, best_score)| score > best_score)
            {
                best = Some((i, score));
            }
        }
        if let Some((i, score)) = best {
            used[i] = true;
            shared += score;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let total = (words_a.len() + words_b.len()) as f64;
    2.0 * shared / total
}

fn word_similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_damerau_levenshtein(a, b)
        .max(strsim::normalized_damerau_levenshtein(singular(a), singular(b)))
}

fn singular(word: &str) -> &str {
    if word.len() > 2 && !word.ends_with("ss") {
        word.strip_suffix('s').unwrap_or(word)
    } else {
        word
    }
}

fn compact(name: &str) -> String {
    name.split_whitespace().collect()
}

fn compact_singular(name: &str) -> String {
    name.split_whitespace().map(singular).collect()
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Bench Press", "bench press")]
    #[case("Bench Press (Barbell)", "bench press")]
    #[case("  BENCH-PRESS  ", "bench press")]
    #[case("Pull-Up [Assisted]", "pull up")]
    #[case("Squat (High Bar) Paused", "squat paused")]
    #[case("(Barbell)", "(barbell)")]
    #[case("Überzug", "überzug")]
    fn test_normalize(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(normalize(name), expected);
    }

    #[rstest]
    #[case("bench press", "bench press", 1.0)]
    #[case("pullup", "pull up", 1.0)]
    #[case("squat", "squats", 1.0)]
    #[case("cable row", "cable rows", 1.0)]
    #[case("push up", "push ups", 1.0)]
    #[case("pullup", "pull ups", 1.0)]
    #[case("chin ups", "chinup", 1.0)]
    #[case("lat pulldown", "lat pulldwn", 0.9375)]
    #[case("incline bench press", "bench press", 0.8)]
    #[case("incline bench press", "decline bench press", 0.666_666)]
    #[case("front squat", "back squat", 0.5)]
    #[case("deadlift", "bench press", 0.0)]
    fn test_similarity(#[case] a: &str, #[case] b: &str, #[case] expected: f64) {
        assert_approx_eq!(similarity(a, b), expected, 0.0001);
        assert_approx_eq!(similarity(b, a), expected, 0.0001);
    }

    #[rstest]
    #[case::case_insensitive(&["Bench Press", "bench press"])]
    #[case::qualifier(&["Bench Press", "Bench Press (Barbell)"])]
    #[case::punctuation(&["Pull-Up", "Pull Up", "pullup"])]
    #[case::plural(&["Squat", "Squats"])]
    #[case::plural_short_root(&["Push Up", "Push Ups"])]
    #[case::plural_separator(&["Pull Up", "Pull Ups", "Pullup", "Pull-Ups"])]
    #[case::plural_punctuation(&["Chin Up", "Chin-Ups"])]
    #[case::typo(&["Romanian Deadlift", "Romanian Dedlift"])]
    #[case::single_char(&["A", "a"])]
    fn test_canonicalize_equivalent(#[case] names: &[&str]) {
        let mut registry = ExerciseRegistry::default();
        let keys = names
            .iter()
            .map(|n| registry.canonicalize(n).unwrap())
            .collect::<Vec<_>>();
        assert!(keys.iter().all(|k| *k == keys[0]), "{names:?} -> {keys:?}");
        assert_eq!(registry.len(), 1);
    }

    #[rstest]
    #[case::extra_word(&["Bench Press", "Incline Bench Press"])]
    #[case::different_word(&["Incline Bench Press", "Decline Bench Press"])]
    #[case::variation(&["Front Squat", "Back Squat", "Squat"])]
    #[case::single_char(&["A", "Ab"])]
    #[case::different_single_chars(&["A", "B"])]
    fn test_canonicalize_distinct(#[case] names: &[&str]) {
        let mut registry = ExerciseRegistry::default();
        let keys = names
            .iter()
            .map(|n| registry.canonicalize(n).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(keys, (0..names.len()).map(ExerciseKey).collect::<Vec<_>>());
    }

    #[test]
    fn test_canonicalize_keeps_first_spelling() {
        let mut registry = ExerciseRegistry::default();
        let key = registry.canonicalize("bench press").unwrap();
        assert_eq!(registry.canonicalize("Bench Press (Barbell)").unwrap(), key);
        assert_eq!(registry.canonicalize("Bench Press").unwrap(), key);
        assert_eq!(registry.name(key), Some(&Name::new("bench press").unwrap()));
    }

    #[test]
    fn test_canonicalize_prefers_most_similar() {
        let mut registry = ExerciseRegistry::new(0.5);
        let bench = registry.canonicalize("Bench Press").unwrap();
        let incline = ExerciseKey(1);
        registry.exercises.push(Exercise {
            key: incline,
            name: Name::new("Incline Bench Press").unwrap(),
            normalized: normalize("Incline Bench Press"),
        });
        assert_eq!(registry.canonicalize("Incline Bench Presses").unwrap(), incline);
        assert_eq!(registry.canonicalize("Bench Presses").unwrap(), bench);
    }

    #[test]
    fn test_canonicalize_tie_resolves_to_first_registered() {
        let mut registry = ExerciseRegistry::new(0.5);
        let first = registry.canonicalize("Front Squat").unwrap();
        registry.exercises.push(Exercise {
            key: ExerciseKey(1),
            name: Name::new("Back Squat").unwrap(),
            normalized: normalize("Back Squat"),
        });
        assert_eq!(registry.canonicalize("Box Squat").unwrap(), first);
    }

    #[test]
    fn test_canonicalize_rejects_empty_name() {
        let mut registry = ExerciseRegistry::default();
        assert_eq!(registry.canonicalize("   "), Err(NameError::Empty));
        assert!(registry.is_empty());
    }

    #[rstest]
    #[case("bench press", Some(ExerciseKey(0)))]
    #[case("Bench Press (Dumbbell)", Some(ExerciseKey(0)))]
    #[case("Squats", Some(ExerciseKey(1)))]
    #[case("Overhead Press", None)]
    #[case("", None)]
    fn test_resolve(#[case] query: &str, #[case] expected: Option<ExerciseKey>) {
        let mut registry = ExerciseRegistry::default();
        registry.canonicalize("Bench Press").unwrap();
        registry.canonicalize("Squat").unwrap();
        assert_eq!(registry.resolve(query), expected);
        assert_eq!(registry.len(), 2);
    }
}
