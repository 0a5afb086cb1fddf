//! Severity → safety-score deduction.

use serde::{Deserialize, Serialize};

/// One step of the schedule: incidents at or above `min_severity` cost
/// `penalty` points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyTier {
  pub min_severity: i64,
  pub penalty:      u8,
}

/// Ordered tiers plus the penalty applied when no tier matches.
///
/// Tiers are kept sorted by `min_severity`; evaluation walks them from lowest
/// to highest and keeps the last one satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSchedule")]
pub struct PenaltySchedule {
  base_penalty: u8,
  tiers:        Vec<PenaltyTier>,
}

/// Deduction when no tier matches.
pub const BASE_PENALTY: u8 = 5;

fn default_base_penalty() -> u8 { BASE_PENALTY }

#[derive(Deserialize)]
struct RawSchedule {
  #[serde(default = "default_base_penalty")]
  base_penalty: u8,
  #[serde(default)]
  tiers:        Vec<PenaltyTier>,
}

impl From<RawSchedule> for PenaltySchedule {
  fn from(raw: RawSchedule) -> Self { Self::new(raw.base_penalty, raw.tiers) }
}

impl Default for PenaltySchedule {
  fn default() -> Self {
    Self::new(BASE_PENALTY, vec![
      PenaltyTier { min_severity: 5, penalty: 15 },
      PenaltyTier { min_severity: 8, penalty: 30 },
    ])
  }
}

impl PenaltySchedule {
  pub fn new(base_penalty: u8, mut tiers: Vec<PenaltyTier>) -> Self {
    tiers.sort_by_key(|t| t.min_severity);
    Self { base_penalty, tiers }
  }

  pub fn base_penalty(&self) -> u8 { self.base_penalty }

  pub fn tiers(&self) -> &[PenaltyTier] { &self.tiers }

  /// Points deducted for an incident of `severity`.
  pub fn penalty_for(&self, severity: i64) -> u8 {
    self
      .tiers
      .iter()
      .rev()
      .find(|t| severity >= t.min_severity)
      .map_or(self.base_penalty, |t| t.penalty)
  }

  /// Score after one incident; never below zero.
  pub fn apply(&self, score: u8, severity: i64) -> u8 {
    score.saturating_sub(self.penalty_for(severity))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_tiers() {
    let s = PenaltySchedule::default();
    assert_eq!(s.penalty_for(1), 5);
    assert_eq!(s.penalty_for(4), 5);
    assert_eq!(s.penalty_for(5), 15);
    assert_eq!(s.penalty_for(7), 15);
    assert_eq!(s.penalty_for(8), 30);
    assert_eq!(s.penalty_for(10), 30);
  }

  #[test]
  fn out_of_range_severity_degrades() {
    let s = PenaltySchedule::default();
    assert_eq!(s.penalty_for(-3), 5);
    assert_eq!(s.penalty_for(0), 5);
    assert_eq!(s.penalty_for(i64::MAX), 30);
  }

  #[test]
  fn apply_clamps_at_zero() {
    let s = PenaltySchedule::default();
    assert_eq!(s.apply(100, 5), 85);
    assert_eq!(s.apply(20, 8), 0);
    assert_eq!(s.apply(0, 1), 0);
  }

  #[test]
  fn unsorted_tiers_are_sorted() {
    let s = PenaltySchedule::new(1, vec![
      PenaltyTier { min_severity: 9, penalty: 50 },
      PenaltyTier { min_severity: 3, penalty: 10 },
    ]);
    assert_eq!(s.tiers()[0].min_severity, 3);
    assert_eq!(s.penalty_for(4), 10);
    assert_eq!(s.penalty_for(9), 50);
  }

  #[test]
  fn deserialize_sorts_tiers() {
    let s: PenaltySchedule = serde_json::from_str(
      r#"{"base_penalty":2,"tiers":[{"min_severity":6,"penalty":20},{"min_severity":2,"penalty":4}]}"#,
    )
    .unwrap();
    assert_eq!(s.base_penalty(), 2);
    assert_eq!(s.penalty_for(1), 2);
    assert_eq!(s.penalty_for(3), 4);
    assert_eq!(s.penalty_for(6), 20);
  }

  #[test]
  fn base_penalty_defaults_when_omitted() {
    let s: PenaltySchedule =
      serde_json::from_str(r#"{"tiers":[{"min_severity":4,"penalty":25}]}"#).unwrap();
    assert_eq!(s.base_penalty(), BASE_PENALTY);
    assert_eq!(s.penalty_for(3), 5);
    assert_eq!(s.penalty_for(4), 25);
  }
}
