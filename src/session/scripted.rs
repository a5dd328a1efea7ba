//! Scripted answer source for generator tests.
use super::prompt::Question;
use super::AnswerSource;
use crate::error::GenResult;
use crate::template::Section;
use serde_yaml::Value;
use std::collections::{BTreeSet, VecDeque};

/// Replays canned replies the way a terminal would: an empty reply takes the
/// question's default.
#[derive(Debug, Default)]
pub struct ScriptedAnswers {
    replies: VecDeque<String>,
    declined: BTreeSet<String>,
    pub asked: Vec<String>,
    pub texts: Vec<String>,
    pub offered_sections: Vec<String>,
}

impl ScriptedAnswers {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|reply| reply.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn declining(mut self, sections: &[&str]) -> Self {
        self.declined = sections.iter().map(|name| name.to_string()).collect();
        self
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl AnswerSource for ScriptedAnswers {
    fn include_section(&mut self, section: &Section) -> GenResult<bool> {
        self.offered_sections.push(section.name().to_string());
        Ok(!self.declined.contains(section.name()))
    }

    fn answer(&mut self, _section: &str, question: &Question<'_>) -> GenResult<Option<Value>> {
        self.asked.push(question.field.to_string());
        self.texts.push(question.text.clone());
        let reply = self.replies.pop_front().unwrap_or_default();
        if reply.is_empty() {
            Ok(question.default.cloned())
        } else {
            Ok(Some(Value::String(reply)))
        }
    }

    fn reprompts_empty(&self) -> bool {
        true
    }
}
