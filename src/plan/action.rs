//! Primitive manipulator actions and the compact per-edge labels the search
//! produces

use serde::{Deserialize, Serialize};

/// Primitive action token consumed by the external actuator.
///
/// `Impossible` is the degenerate one-token plan reported when no action
/// sequence can reach the goal; planning always yields a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanToken {
    Left,
    Right,
    Pick,
    Drop,
    Impossible,
}

impl PlanToken {
    /// Single-letter shorthand used by plan strings like "p r r d"
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "l" => PlanToken::Left,
            "r" => PlanToken::Right,
            "p" => PlanToken::Pick,
            "d" => PlanToken::Drop,
            _ => return None,
        })
    }
}

impl std::fmt::Display for PlanToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PlanToken::Left => "left",
            PlanToken::Right => "right",
            PlanToken::Pick => "pick",
            PlanToken::Drop => "drop",
            PlanToken::Impossible => "impossible",
        })
    }
}

/// Which way the arm travels before acting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// What the arm does once in position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmOp {
    Pick,
    Drop,
}

/// Compact label for one search edge: travel some distance, then pick or
/// drop. Decodes into a flat run of primitive tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionLabel {
    pub direction: Option<Direction>,
    pub distance: usize,
    pub op: ArmOp,
}

impl ActionLabel {
    /// Act at the arm's current column, no travel
    pub fn arm_only(op: ArmOp) -> Self {
        Self {
            direction: None,
            distance: 0,
            op,
        }
    }

    pub fn with_move(direction: Direction, distance: usize, op: ArmOp) -> Self {
        Self {
            direction: Some(direction),
            distance,
            op,
        }
    }

    /// Append this label's primitive tokens to a plan
    pub fn expand(&self, plan: &mut Vec<PlanToken>) {
        if let Some(direction) = self.direction {
            let step = match direction {
                Direction::Left => PlanToken::Left,
                Direction::Right => PlanToken::Right,
            };
            plan.extend(std::iter::repeat(step).take(self.distance));
        }
        plan.push(match self.op {
            ArmOp::Pick => PlanToken::Pick,
            ArmOp::Drop => PlanToken::Drop,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_expands_to_flat_tokens() {
        let mut plan = Vec::new();
        ActionLabel::with_move(Direction::Right, 3, ArmOp::Pick).expand(&mut plan);
        ActionLabel::with_move(Direction::Left, 1, ArmOp::Drop).expand(&mut plan);
        assert_eq!(
            plan,
            vec![
                PlanToken::Right,
                PlanToken::Right,
                PlanToken::Right,
                PlanToken::Pick,
                PlanToken::Left,
                PlanToken::Drop,
            ]
        );
    }

    #[test]
    fn test_arm_only_label_has_no_travel() {
        let mut plan = Vec::new();
        ActionLabel::arm_only(ArmOp::Drop).expand(&mut plan);
        assert_eq!(plan, vec![PlanToken::Drop]);
    }

    #[test]
    fn test_token_round_trip() {
        for (code, token) in [
            ("l", PlanToken::Left),
            ("r", PlanToken::Right),
            ("p", PlanToken::Pick),
            ("d", PlanToken::Drop),
        ] {
            assert_eq!(PlanToken::from_code(code), Some(token));
        }
        assert_eq!(PlanToken::from_code("x"), None);
        assert_eq!(PlanToken::Impossible.to_string(), "impossible");
    }
}
