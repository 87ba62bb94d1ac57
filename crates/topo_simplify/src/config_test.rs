use super::*;
use crate::test_utils::{extremes_field, mesh_of};

/// The default threshold of zero marks nothing as noise.
#[test]
fn test_default_is_valid_and_inert() {
  let config = SimplifyConfig::default();
  assert!(config.validate().is_ok());
  assert_eq!(config.run_mode, RunMode::Lazy);
  assert_eq!(config.mode, SimplifyMode::Destructive);

  let tree = AugmentedTree::build(&mesh_of(&extremes_field()), config.direction);
  assert!(!config.threshold(&tree).is_noise(0.0));
}

#[test]
fn test_rejects_negative_and_non_finite_thresholds() {
  for bad in [-1.0, f32::NAN, f32::INFINITY] {
    let config = SimplifyConfig {
      persistence_threshold: bad,
      ..Default::default()
    };
    assert!(
      matches!(config.validate(), Err(SimplifyError::InvalidConfig(_))),
      "{bad} should be rejected"
    );
  }
}

#[test]
fn test_relative_threshold_bounded_by_one() {
  let config = SimplifyConfig {
    persistence_threshold: 1.5,
    relative: true,
    ..Default::default()
  };
  assert!(config.validate().is_err());

  let absolute = SimplifyConfig {
    relative: false,
    ..config
  };
  assert!(absolute.validate().is_ok());
}

/// Relative thresholds scale with max persistence (9 for this field).
#[test]
fn test_relative_threshold_resolves_against_tree() {
  let tree = AugmentedTree::build(&mesh_of(&extremes_field()), Direction::Ascending);
  let config = SimplifyConfig {
    persistence_threshold: 0.5,
    relative: true,
    ..Default::default()
  };
  assert_eq!(config.threshold(&tree).value(), 4.5);
}
