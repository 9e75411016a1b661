use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::DrillError;

/// Identifies one question: a topic number (1-based) and the question's
/// 0-based index within that topic.
///
/// Rendered as `T{topic} Q{index + 1}`, which is also the wire format the
/// backend uses for incorrect-question lists and submission keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionId {
    pub topic: u32,
    pub index: u32,
}

impl QuestionId {
    pub fn new(topic: u32, index: u32) -> Self {
        Self { topic, index }
    }

    /// The 1-based question number shown to users.
    pub fn number(&self) -> u32 {
        self.index + 1
    }

    pub fn in_topic(&self, topic: u32) -> bool {
        self.topic == topic
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{} Q{}", self.topic, self.number())
    }
}

impl FromStr for QuestionId {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DrillError::InvalidQuestionId(s.to_string());

        let mut parts = s.split_whitespace();
        let (Some(topic_part), Some(question_part), None) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let topic = topic_part
            .strip_prefix(['T', 't'])
            .and_then(|t| t.parse::<u32>().ok())
            .filter(|t| *t >= 1)
            .ok_or_else(invalid)?;
        let number = question_part
            .strip_prefix(['Q', 'q'])
            .and_then(|q| q.parse::<u32>().ok())
            .filter(|n| *n >= 1)
            .ok_or_else(invalid)?;

        Ok(QuestionId::new(topic, number - 1))
    }
}

impl Serialize for QuestionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Travel direction for next/previous navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// The signed step this direction applies to an index.
    pub fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_one_based() {
        assert_eq!(QuestionId::new(1, 0).to_string(), "T1 Q1");
        assert_eq!(QuestionId::new(12, 41).to_string(), "T12 Q42");
    }

    #[test]
    fn test_parse_display_form() {
        assert_eq!("T1 Q3".parse::<QuestionId>().unwrap(), QuestionId::new(1, 2));
        assert_eq!("t2  q10".parse::<QuestionId>().unwrap(), QuestionId::new(2, 9));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("".parse::<QuestionId>().is_err());
        assert!("T1".parse::<QuestionId>().is_err());
        assert!("T1 Q0".parse::<QuestionId>().is_err());
        assert!("T0 Q1".parse::<QuestionId>().is_err());
        assert!("1 2".parse::<QuestionId>().is_err());
        assert!("T1 Q2 extra".parse::<QuestionId>().is_err());
        assert!("T1 Qx".parse::<QuestionId>().is_err());
    }

    #[test]
    fn test_serde_uses_display_string() {
        let ids = vec![QuestionId::new(1, 1), QuestionId::new(3, 0)];
        let json = serde_json::to_string(&ids).unwrap();
        assert_eq!(json, r#"["T1 Q2","T3 Q1"]"#);

        let parsed: Vec<QuestionId> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ids);
    }

    #[test]
    fn test_ordering_is_topic_then_index() {
        let mut ids = vec![
            QuestionId::new(2, 0),
            QuestionId::new(1, 4),
            QuestionId::new(1, 1),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                QuestionId::new(1, 1),
                QuestionId::new(1, 4),
                QuestionId::new(2, 0)
            ]
        );
    }

    #[test]
    fn test_direction_step() {
        assert_eq!(Direction::Forward.step(), 1);
        assert_eq!(Direction::Backward.step(), -1);
    }
}
