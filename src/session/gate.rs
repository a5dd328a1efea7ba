//! Dependency gate carried through one section's traversal.
use crate::template::Requires;
use serde_yaml::Value;
use std::collections::BTreeSet;

/// Field names currently unlocked by an earlier `requires` match.
///
/// A fresh gate is created for every section, so nothing unlocked in one
/// section can leak into the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGate {
    current_depends: BTreeSet<String>,
}

impl DependencyGate {
    /// Whether an earlier answer named `field` as a dependent.
    pub fn unlocks(&self, field: &str) -> bool {
        self.current_depends.contains(field)
    }

    /// Settle the gate after the field that staged `requires` was answered.
    ///
    /// A matching answer opens the gate to the staged dependents; any other
    /// answer closes it. Fields without `requires` leave the gate as is.
    pub fn settle(self, staged: Option<&Requires>, raw_answer: Option<&Value>) -> Self {
        let Some(requires) = staged else {
            return self;
        };
        if raw_answer.is_some_and(|answer| answer_matches(requires.answer(), answer)) {
            Self {
                current_depends: requires.dependents().iter().cloned().collect(),
            }
        } else {
            Self::default()
        }
    }
}

/// Compare the raw (uncoerced) answer against the expected text.
///
/// Booleans compare case-insensitively so a `False` default matches
/// `requires: "False:..."`.
fn answer_matches(expected: &str, answer: &Value) -> bool {
    match answer {
        Value::String(text) => text == expected,
        Value::Bool(flag) => expected.eq_ignore_ascii_case(&flag.to_string()),
        Value::Number(number) => number.to_string() == expected,
        _ => false,
    }
}
