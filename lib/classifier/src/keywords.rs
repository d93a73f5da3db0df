//! Keyword trigger table
//!
//! Handcrafted per-class trigger substrings, matched against the lower-cased
//! symptom text. Matching is plain substring containment with no
//! tokenization or word-boundary checks; that behavior is load-bearing for
//! the booster and must not be "improved" in place. The [`KeywordMatcher`]
//! trait is the seam for swapping in a tokenized matcher later.

use ahash::AHashMap;
use dermadx_core::{Disease, Result};

/// Decides whether a class has textual support in the input.
pub trait KeywordMatcher: Send + Sync {
    /// Whether any of `disease`'s triggers occurs in `text_lower`.
    ///
    /// `text_lower` must already be lower-cased; triggers are stored
    /// lower-cased.
    fn matches(&self, text_lower: &str, disease: Disease) -> bool;
}

/// Substring-containment matcher over a per-class trigger table.
#[derive(Debug, Clone)]
pub struct SubstringMatcher {
    table: AHashMap<Disease, Vec<String>>,
}

impl SubstringMatcher {
    /// Matcher with the built-in trigger table.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = AHashMap::new();
        for (disease, triggers) in BUILTIN_TRIGGERS {
            table.insert(
                *disease,
                triggers.iter().map(|t| t.to_string()).collect(),
            );
        }
        Self { table }
    }

    /// Matcher from an explicit table; triggers are lower-cased on entry.
    /// Classes absent from the table simply never match.
    #[must_use]
    pub fn from_table(table: AHashMap<Disease, Vec<String>>) -> Self {
        let table = table
            .into_iter()
            .map(|(disease, triggers)| {
                (
                    disease,
                    triggers.into_iter().map(|t| t.to_lowercase()).collect(),
                )
            })
            .collect();
        Self { table }
    }

    /// Matcher from a string-keyed table, e.g. one deserialized from a
    /// JSON override file. Keys must be dataset label strings.
    pub fn from_labeled_table(
        table: impl IntoIterator<Item = (String, Vec<String>)>,
    ) -> Result<Self> {
        let mut parsed = AHashMap::new();
        for (label, triggers) in table {
            parsed.insert(label.parse::<Disease>()?, triggers);
        }
        Ok(Self::from_table(parsed))
    }

    /// Triggers registered for a class.
    #[must_use]
    pub fn triggers(&self, disease: Disease) -> &[String] {
        self.table.get(&disease).map_or(&[], Vec::as_slice)
    }
}

impl Default for SubstringMatcher {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KeywordMatcher for SubstringMatcher {
    fn matches(&self, text_lower: &str, disease: Disease) -> bool {
        self.triggers(disease)
            .iter()
            .any(|trigger| text_lower.contains(trigger.as_str()))
    }
}

/// The trigger table shipped with the reference dataset.
const BUILTIN_TRIGGERS: &[(Disease, &[&str])] = &[
    (
        Disease::Ringworm,
        &[
            "circle", "circular", "ring", "round", "bald spot", "coin", "oval", "lesion",
        ],
    ),
    (
        Disease::Demodicosis,
        &[
            "mite", "mange", "demodex", "crust", "eye", "bug", "scab", "insect", "patchy",
        ],
    ),
    (
        Disease::FungalInfections,
        &[
            "yeast", "smell", "odor", "greasy", "black", "stink", "oily", "thick", "musty",
        ],
    ),
    (
        Disease::Dermatitis,
        &[
            "hot spot", "inflamed", "irritated", "wet", "red skin", "scratch", "raw", "rash",
            "angry",
        ],
    ),
    (
        Disease::Hypersensitivity,
        &[
            "flea", "tail", "allergic", "allergy", "hives", "summer", "grass", "season",
            "reaction",
        ],
    ),
    (
        Disease::Healthy,
        &[
            "clean", "shiny", "healthy", "normal", "clear", "soft", "pretty", "no issue",
        ],
    ),
];
