//! Fuzzy matching of hole names against free-text triple fields.
//!
//! The upstream extractor produces noisy subjects and objects ("the Auth
//! service", "AuthHandler"), so dependency inference only asks whether a
//! hole is *mentioned* in a field. [`SubstringMatcher`] is the default and
//! low-precision: a hole named `Auth` is also mentioned by
//! `OAuthToken`. [`WholeWordMatcher`] trades that recall away for precision.

use holeplan_core::EnhancedHole;

/// Decides whether a piece of triple text refers to a hole.
pub trait HoleMatcher {
    fn mentions(&self, text: &str, hole: &EnhancedHole) -> bool;
}

/// Case-sensitive substring containment of the hole type.
///
/// An empty hole type is contained in every string and therefore matches
/// everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl HoleMatcher for SubstringMatcher {
    fn mentions(&self, text: &str, hole: &EnhancedHole) -> bool {
        text.contains(hole.hole_type.as_str())
    }
}

/// Case-sensitive match of the hole type as a whole word.
///
/// An occurrence counts only when it is not glued to other alphanumeric
/// characters, so `Auth` matches "the Auth service" but not "OAuthToken".
/// Empty hole types never match.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeWordMatcher;

impl HoleMatcher for WholeWordMatcher {
    fn mentions(&self, text: &str, hole: &EnhancedHole) -> bool {
        let needle = hole.hole_type.as_str();
        if needle.is_empty() {
            return false;
        }

        text.match_indices(needle).any(|(start, _)| {
            let before = text[..start].chars().next_back();
            let after = text[start + needle.len()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hole(name: &str) -> EnhancedHole {
        EnhancedHole::new(0, name, 5, 5)
    }

    #[test]
    fn substring_matcher_is_permissive() {
        let m = SubstringMatcher;
        assert!(m.mentions("the Auth service", &hole("Auth")));
        assert!(m.mentions("OAuthToken", &hole("Auth")));
        assert!(!m.mentions("auth", &hole("Auth")));
        assert!(m.mentions("anything", &hole("")));
    }

    #[test]
    fn whole_word_matcher_rejects_glued_occurrences() {
        let m = WholeWordMatcher;
        assert!(m.mentions("the Auth service", &hole("Auth")));
        assert!(m.mentions("Auth", &hole("Auth")));
        assert!(m.mentions("Auth-layer", &hole("Auth")));
        assert!(!m.mentions("OAuthToken", &hole("Auth")));
        assert!(m.mentions("OAuthToken or Auth", &hole("Auth")));
        assert!(!m.mentions("anything", &hole("")));
    }
}
