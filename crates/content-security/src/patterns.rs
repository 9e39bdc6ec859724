//! Prompt-injection pattern registry.
//!
//! Contains the static, ordered catalogue of named pattern groups used to
//! classify untrusted text.  Each group carries a human-readable name, a
//! description used in reported errors, and an ordered list of regex strings
//! that are compiled at validator-construction time.
//!
//! Group order is significant: errors are reported in the order the groups
//! appear in [`PATTERN_GROUPS`].

// ---------------------------------------------------------------------------
// Group definition
// ---------------------------------------------------------------------------

/// A named detection category.
///
/// A group is reported at most once per validated string, no matter how many
/// of its patterns match (or how often a single pattern matches).
#[derive(Debug)]
pub struct PatternGroup {
    /// Category name, appended to the description in reported errors.
    pub name: &'static str,
    /// Regex strings evaluated in order (compiled by
    /// [`crate::validator::ContentValidator`]).
    pub patterns: &'static [&'static str],
    /// Leading text of the reported error.
    pub description: &'static str,
}

impl PatternGroup {
    /// The error string reported when this group matches:
    /// `"<description>: <name>"`.
    pub fn error_message(&self) -> String {
        format!("{}: {}", self.description, self.name)
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The built-in pattern registry, in evaluation order.
///
/// All patterns are case-insensitive.  Only the jailbreak keywords are
/// anchored on word boundaries: "bypass" must fire, "hackathon" must not.
/// The boundaries are ASCII-only, so a keyword written directly against
/// CJK or accented letters still counts as a whole word.
pub static PATTERN_GROUPS: &[PatternGroup] = &[
    PatternGroup {
        name: "Ignore Instructions",
        patterns: &[
            r"(?i)ignore\s+(all\s+)?(previous\s+)?(instructions?|directions?|rules?|prompts?)",
            r"(?i)forget\s+(all\s+)?(previous\s+)?(instructions?|directions?|rules?|prompts?)",
            r"(?i)disregard\s+(all\s+)?(previous\s+)?(instructions?|directions?|rules?|prompts?)",
        ],
        description: "Attempt to ignore previous instructions",
    },
    PatternGroup {
        name: "Override Instructions",
        patterns: &[
            r"(?i)(new|override|replace)\s+(all\s+)?(the\s+)?((previous|prior)\s+)?(instructions?|directions?|rules?|prompts?)",
        ],
        description: "Attempt to override instructions",
    },
    PatternGroup {
        name: "Jailbreak Attempt",
        patterns: &[
            r"(?i)(?-u:\b)(jailbreak|bypass|hack|exploit)(?-u:\b)",
            r"(?i)(developer\s+mode|debug\s+mode|admin\s+mode)",
        ],
        description: "Potential jailbreak attempt",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        for group in PATTERN_GROUPS {
            for pat in group.patterns {
                regex::Regex::new(pat).unwrap_or_else(|e| {
                    panic!("pattern '{pat}' in group '{}' failed to compile: {e}", group.name)
                });
            }
        }
    }

    #[test]
    fn group_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for group in PATTERN_GROUPS {
            assert!(seen.insert(group.name), "duplicate group name: {}", group.name);
        }
    }

    #[test]
    fn registry_order_is_fixed() {
        let names: Vec<&str> = PATTERN_GROUPS.iter().map(|g| g.name).collect();
        assert_eq!(
            names,
            ["Ignore Instructions", "Override Instructions", "Jailbreak Attempt"]
        );
    }

    #[test]
    fn error_message_joins_description_and_name() {
        assert_eq!(
            PATTERN_GROUPS[2].error_message(),
            "Potential jailbreak attempt: Jailbreak Attempt"
        );
    }

    #[test]
    fn every_group_has_patterns() {
        for group in PATTERN_GROUPS {
            assert!(!group.patterns.is_empty(), "group '{}' is empty", group.name);
        }
    }
}
