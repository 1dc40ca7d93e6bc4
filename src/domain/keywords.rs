// src/domain/keywords.rs
//
// Keyword families for the free-text amenity classifiers. The rules live
// here as data so they can be extended without touching the matching code.

use crate::domain::listing::Presence;

/// Subjects and qualifiers that, combined, signal a pet-friendly unit
/// ("pets welcome", "dog friendly", "cats ok", ...).
const PET_SUBJECTS: &[&str] = &["pet", "pets", "dog", "dogs", "cat", "cats"];
const PET_QUALIFIERS: &[&str] = &["friendly", "allowed", "ok", "welcome"];

/// Direct mentions of carpet-free flooring.
const CARPET_FREE_TERMS: &[&str] = &[
    "carpet-free",
    "carpet free",
    "no carpet",
    "hardwood",
    "laminate floor",
    "tile floor",
];

/// Basement mentions, including the common abbreviation with or without a
/// trailing period ("bsmt", "bsmt.").
const BASEMENT_TERMS: &[&str] = &["basement", "bsmt"];

/// Runs a predicate over optional free text: absent text is Unknown, text
/// with no match is No.
pub fn classify(text: Option<&str>, matcher: fn(&str) -> bool) -> Presence {
    match text {
        None => Presence::Unknown,
        Some(t) => {
            if matcher(&t.to_lowercase()) {
                Presence::Yes
            } else {
                Presence::No
            }
        }
    }
}

/// Expects lower-cased text.
pub fn mentions_pet_friendly(text: &str) -> bool {
    PET_SUBJECTS.iter().any(|subject| {
        PET_QUALIFIERS.iter().any(|qualifier| {
            text.contains(&format!("{subject} {qualifier}"))
                || text.contains(&format!("{subject}-{qualifier}"))
        })
    })
}

/// Expects lower-cased text.
pub fn mentions_carpet_free(text: &str) -> bool {
    CARPET_FREE_TERMS.iter().any(|term| text.contains(term))
}

/// Expects lower-cased text.
pub fn mentions_basement(text: &str) -> bool {
    BASEMENT_TERMS.iter().any(|term| text.contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pet_friendly_combinations_match() {
        assert!(mentions_pet_friendly("small dogs welcome in this unit"));
        assert!(mentions_pet_friendly("we are a pet-friendly building"));
        assert!(mentions_pet_friendly("cats ok with deposit"));
        assert!(!mentions_pet_friendly("no pets please"));
        assert!(!mentions_pet_friendly("friendly neighbourhood cafe"));
    }

    #[test]
    fn carpet_free_terms_match() {
        assert!(mentions_carpet_free("hardwood throughout"));
        assert!(mentions_carpet_free("brand new laminate flooring"));
        assert!(mentions_carpet_free("no carpet anywhere"));
        assert!(!mentions_carpet_free("freshly cleaned carpet"));
    }

    #[test]
    fn basement_abbreviation_matches_with_and_without_period() {
        assert!(mentions_basement("bright bsmt. apartment"));
        assert!(mentions_basement("walkout bsmt suite"));
        assert!(mentions_basement("finished basement"));
        assert!(!mentions_basement("main floor unit"));
    }

    #[test]
    fn classify_distinguishes_absent_from_unmatched() {
        assert_eq!(classify(None, mentions_pet_friendly), Presence::Unknown);
        assert_eq!(
            classify(Some("quiet building"), mentions_pet_friendly),
            Presence::No
        );
        assert_eq!(
            classify(Some("Pets Welcome!"), mentions_pet_friendly),
            Presence::Yes
        );
    }
}
