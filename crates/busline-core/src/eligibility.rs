//! Eligibility — a derived classification, never stored.

use serde::{Deserialize, Serialize};

use crate::{UnixTime, driver::Driver};

/// 365 days in seconds.
pub const BACKGROUND_CHECK_WINDOW_SECS: i64 = 31_536_000;

pub const MIN_SAFETY_SCORE: u8 = 70;

/// Thresholds the four eligibility predicates are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityPolicy {
  /// Inclusive lower bound on `safety_score`.
  pub min_safety_score:             u8,
  /// A background check older than this (or exactly this old) has lapsed.
  pub background_check_window_secs: i64,
}

impl Default for EligibilityPolicy {
  fn default() -> Self {
    Self {
      min_safety_score:             MIN_SAFETY_SCORE,
      background_check_window_secs: BACKGROUND_CHECK_WINDOW_SECS,
    }
  }
}

/// The four independent predicates behind an eligibility decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
  pub license_valid:           bool,
  pub background_check_valid:  bool,
  pub safety_score_acceptable: bool,
  pub is_active:               bool,
}

impl Eligibility {
  pub fn evaluate(
    driver: &Driver,
    current_time: UnixTime,
    policy: &EligibilityPolicy,
  ) -> Self {
    let since_check = current_time.saturating_sub(driver.last_background_check);
    Self {
      license_valid:           driver.license_expiry > current_time,
      background_check_valid:  since_check < policy.background_check_window_secs,
      safety_score_acceptable: driver.safety_score >= policy.min_safety_score,
      is_active:               driver.active,
    }
  }

  pub fn is_eligible(&self) -> bool {
    self.license_valid
      && self.background_check_valid
      && self.safety_score_acceptable
      && self.is_active
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const NOW: UnixTime = 1_693_526_400;

  fn driver() -> Driver {
    Driver {
      name:                  "Dana Reyes".into(),
      license_number:        "DL12345678".into(),
      license_expiry:        1_735_689_600,
      qualifications:        vec!["CDL Class B".into()],
      active:                true,
      safety_score:          90,
      last_background_check: 1_672_531_200,
    }
  }

  #[test]
  fn all_predicates_hold() {
    let e = Eligibility::evaluate(&driver(), NOW, &EligibilityPolicy::default());
    assert!(e.license_valid);
    assert!(e.background_check_valid);
    assert!(e.safety_score_acceptable);
    assert!(e.is_active);
    assert!(e.is_eligible());
  }

  #[test]
  fn expiry_equal_to_now_is_invalid() {
    let d = Driver { license_expiry: NOW, ..driver() };
    let e = Eligibility::evaluate(&d, NOW, &EligibilityPolicy::default());
    assert!(!e.license_valid);
    assert!(!e.is_eligible());
  }

  #[test]
  fn background_check_window_is_exclusive() {
    let policy = EligibilityPolicy::default();
    let exactly = Driver {
      last_background_check: NOW - BACKGROUND_CHECK_WINDOW_SECS,
      ..driver()
    };
    assert!(!Eligibility::evaluate(&exactly, NOW, &policy).background_check_valid);

    let just_inside = Driver {
      last_background_check: NOW - BACKGROUND_CHECK_WINDOW_SECS + 1,
      ..driver()
    };
    assert!(Eligibility::evaluate(&just_inside, NOW, &policy).background_check_valid);
  }

  #[test]
  fn score_threshold_is_inclusive() {
    let policy = EligibilityPolicy::default();
    let at = Driver { safety_score: 70, ..driver() };
    let below = Driver { safety_score: 69, ..driver() };
    assert!(Eligibility::evaluate(&at, NOW, &policy).is_eligible());
    assert!(!Eligibility::evaluate(&below, NOW, &policy).is_eligible());
  }

  #[test]
  fn inactive_driver_is_ineligible() {
    let d = Driver { active: false, ..driver() };
    let e = Eligibility::evaluate(&d, NOW, &EligibilityPolicy::default());
    assert!(!e.is_active);
    assert!(!e.is_eligible());
  }

  #[test]
  fn custom_policy() {
    let strict = EligibilityPolicy { min_safety_score: 95, ..Default::default() };
    assert!(!Eligibility::evaluate(&driver(), NOW, &strict).is_eligible());
  }
}
