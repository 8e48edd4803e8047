//! Achievement badges unlocked at round milestones.

use serde::{Deserialize, Serialize};

/// A badge earned by guessing correctly on a milestone round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Badge {
    /// Round 5.
    DetectiveNovice,
    /// Round 13.
    DetectivePro,
    /// Round 20.
    DetectiveMaster,
}

impl Badge {
    /// The badge awarded for a correct guess on `round`, if any.
    #[must_use]
    pub fn for_round(round: u32) -> Option<Self> {
        match round {
            5 => Some(Self::DetectiveNovice),
            13 => Some(Self::DetectivePro),
            20 => Some(Self::DetectiveMaster),
            _ => None,
        }
    }

    /// Stable identifier, as shown to the presentation layer.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DetectiveNovice => "DETECTIVE_NOVICE",
            Self::DetectivePro => "DETECTIVE_PRO",
            Self::DetectiveMaster => "DETECTIVE_MASTER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_milestone_rounds_award_badges() {
        let awarded: Vec<_> = (1..=25).filter_map(Badge::for_round).collect();
        assert_eq!(
            awarded,
            vec![Badge::DetectiveNovice, Badge::DetectivePro, Badge::DetectiveMaster]
        );
    }

    #[test]
    fn test_serialized_name_matches_identifier() {
        let json = serde_json::to_value(Badge::DetectivePro).unwrap();
        assert_eq!(json, Badge::DetectivePro.as_str());
    }
}
