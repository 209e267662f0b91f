//! In-memory actor modifier table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ports::ActorModifiers;
use crate::value_objects::CheckInput;

/// Modifiers known for one actor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActorStatLine {
    /// Used when a check names no skill or an unlisted one
    pub base: i32,
    /// Skill name (lowercase) to modifier
    pub skills: HashMap<String, i32>,
    pub initiative: i32,
}

/// Actor id to [`ActorStatLine`], built by the caller from its character sheets.
///
/// Serializes as a plain JSON object keyed by actor id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatTable {
    actors: HashMap<String, ActorStatLine>,
}

impl StatTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(mut self, actor_id: impl Into<String>, modifier: i32) -> Self {
        self.line_mut(actor_id).base = modifier;
        self
    }

    pub fn with_skill(
        mut self,
        actor_id: impl Into<String>,
        skill: &str,
        modifier: i32,
    ) -> Self {
        self.line_mut(actor_id)
            .skills
            .insert(skill.to_lowercase(), modifier);
        self
    }

    pub fn with_initiative(mut self, actor_id: impl Into<String>, modifier: i32) -> Self {
        self.line_mut(actor_id).initiative = modifier;
        self
    }

    fn line_mut(&mut self, actor_id: impl Into<String>) -> &mut ActorStatLine {
        self.actors.entry(actor_id.into()).or_default()
    }
}

impl ActorModifiers for StatTable {
    fn check_modifier(&self, input: &CheckInput) -> Option<i32> {
        let line = self.actors.get(&input.actor_id)?;
        let skill = input
            .skill
            .as_deref()
            .and_then(|skill| line.skills.get(&skill.to_lowercase()));
        Some(skill.copied().unwrap_or(line.base))
    }

    fn initiative_modifier(&self, actor_id: &str) -> Option<i32> {
        self.actors.get(actor_id).map(|line| line.initiative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> StatTable {
        StatTable::new()
            .with_base("pc1", 1)
            .with_skill("pc1", "Athletics", 4)
            .with_initiative("pc1", 2)
    }

    #[test]
    fn skill_lookup_is_case_insensitive() {
        let input = CheckInput::new("pc1").with_skill("ATHLETICS");
        assert_eq!(table().check_modifier(&input), Some(4));
    }

    #[test]
    fn unlisted_skill_falls_back_to_base() {
        let input = CheckInput::new("pc1").with_skill("stealth");
        assert_eq!(table().check_modifier(&input), Some(1));
        assert_eq!(table().check_modifier(&CheckInput::new("pc1")), Some(1));
    }

    #[test]
    fn unknown_actor_has_no_data() {
        let input = CheckInput::new("npc9").with_skill("athletics");
        assert_eq!(table().check_modifier(&input), None);
        assert_eq!(table().initiative_modifier("npc9"), None);
        assert_eq!(table().initiative_modifier("pc1"), Some(2));
    }

    #[test]
    fn reads_from_json_object() {
        let json = r#"{ "pc1": { "base": 1, "skills": { "athletics": 4 } }, "npc": {} }"#;
        let table: StatTable = serde_json::from_str(json).expect("valid table");
        assert_eq!(
            table.check_modifier(&CheckInput::new("pc1").with_skill("athletics")),
            Some(4)
        );
        assert_eq!(table.initiative_modifier("pc1"), Some(0));
        assert_eq!(table.check_modifier(&CheckInput::new("npc")), Some(0));
    }
}
