//! Check and damage value objects exchanged with the rules engines.

use serde::{Deserialize, Serialize};

use super::DiceRoll;

/// A request to resolve one ability or skill check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInput {
    pub actor_id: String,
    /// System-specific skill name, e.g. "athletics"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    /// Target number; each system supplies its own baseline when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<i32>,
    /// Narrative hints ("desperate", "controlled"). They may flavor the
    /// detail text but never change the outcome.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl CheckInput {
    pub fn new(actor_id: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            ..Self::default()
        }
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skill = Some(skill.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: i32) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub success: bool,
    pub roll_total: i32,
    /// Human-readable arithmetic, e.g. "1d20(13) + 2 vs DC 12"
    pub detail: String,
    /// Signed distance from the relevant threshold (system-specific)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<i32>,
}

/// Outcome of a damage roll.
///
/// `breakdown` holds each die face in roll order; the flat modifier is only
/// reflected in `total`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DamageResult {
    pub total: i32,
    pub breakdown: Vec<i32>,
}

impl From<DiceRoll> for DamageResult {
    fn from(roll: DiceRoll) -> Self {
        Self {
            total: roll.total,
            breakdown: roll.parts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_input_builder() {
        let input = CheckInput::new("pc1")
            .with_skill("athletics")
            .with_difficulty(12)
            .with_tag("desperate");
        assert_eq!(input.actor_id, "pc1");
        assert_eq!(input.skill.as_deref(), Some("athletics"));
        assert_eq!(input.difficulty, Some(12));
        assert_eq!(input.tags, vec!["desperate".to_string()]);
    }

    #[test]
    fn check_input_deserializes_camel_case_with_optional_fields() {
        let input: CheckInput =
            serde_json::from_str(r#"{"actorId":"pc1","difficulty":15}"#).expect("valid json");
        assert_eq!(input, CheckInput::new("pc1").with_difficulty(15));
    }

    #[test]
    fn check_result_serializes_camel_case() {
        let result = CheckResult {
            success: true,
            roll_total: 13,
            detail: "1d20(13) + 0 vs DC 12".to_string(),
            margin: Some(1),
        };
        let json = serde_json::to_value(&result).expect("serializable");
        assert_eq!(json["rollTotal"], 13);
        assert_eq!(json["margin"], 1);
    }

    #[test]
    fn damage_result_from_roll() {
        let damage = DamageResult::from(DiceRoll {
            total: 7,
            parts: vec![4, 2],
        });
        assert_eq!(damage.total, 7);
        assert_eq!(damage.breakdown, vec![4, 2]);
    }
}
