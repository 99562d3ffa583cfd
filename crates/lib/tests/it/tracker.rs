//! Tests for MutationTracker and SharedTracker.

use formstate::{MutationTracker, SharedTracker, TrackerOptions};
use serde_json::json;

use crate::helpers::*;

#[test]
fn test_fresh_tracker_defaults_and_seed() -> formstate::Result<()> {
    let tracker = flag_tracker(&small_subject(), &["a.b"]);
    assert!(*tracker.get_mutated_by_attribute_name("a.b")?);
    assert!(!*tracker.get_mutated_by_attribute_name("a.c.0")?);
    assert!(!*tracker.get_mutated_by_attribute_name("a.c.1")?);
    Ok(())
}

#[test]
fn test_one_slot_per_leaf() {
    let tracker = flag_tracker(&registration_subject(), &[]);
    let paths: Vec<String> = tracker
        .leaves()
        .into_iter()
        .map(|(path, _)| path.to_string())
        .collect();
    assert_eq!(paths, REGISTRATION_LEAVES.to_vec());
}

#[test]
fn test_unknown_path_reads_default() -> formstate::Result<()> {
    let tracker = MutationTracker::new(&small_subject(), TrackerOptions::new(Vec::<String>::new()));
    assert!(tracker.get_mutated_by_attribute_name("nowhere.at.all")?.is_empty());
    assert!(tracker.get_mutated_by_attribute_name("a.c.7")?.is_empty());
    Ok(())
}

#[test]
fn test_set_then_get_round_trip() -> formstate::Result<()> {
    let mut tracker = flag_tracker(&small_subject(), &[]);
    for path in ["a.b", "a.c.1", "added.later", "a.c.4"] {
        tracker.set_mutated_by_attribute_name(true, path)?;
        assert!(*tracker.get_mutated_by_attribute_name(path)?, "'{path}'");
        tracker.set_mutated_by_attribute_name(false, path)?;
        assert!(!*tracker.get_mutated_by_attribute_name(path)?, "'{path}'");
    }
    Ok(())
}

#[test]
fn test_bulk_set_then_set_all() -> formstate::Result<()> {
    let mut tracker = flag_tracker(&small_subject(), &[]);
    tracker.set_mutated_by_attribute_names(true, ["a.b", "a.c.0"])?;
    assert_all_flags(&tracker, &["a.b", "a.c.0"], true);
    assert_all_flags(&tracker, &["a.c.1"], false);

    tracker.set_all(false);
    assert_all_flags(&tracker, &["a.b", "a.c.0", "a.c.1"], false);
    Ok(())
}

#[test]
fn test_set_all_adds_no_leaves() {
    let mut tracker = flag_tracker(&small_subject(), &[]);
    tracker.set_all(true);
    assert_eq!(tracker.leaves().len(), 3);
    assert!(!*tracker.get_at(&kp("a.d")));
}

#[test]
fn test_clear_ignores_seed() -> formstate::Result<()> {
    let mut tracker = flag_tracker(&small_subject(), &["a.b"]);
    tracker.set_mutated_by_attribute_name(true, "a.c.1")?;
    tracker.clear();
    assert_all_flags(&tracker, &["a.b", "a.c.0", "a.c.1"], false);
    Ok(())
}

#[test]
fn test_reset_restores_construction_state() -> formstate::Result<()> {
    let mut tracker = flag_tracker(&registration_subject(), &["name", "phones.1"]);
    let initial = tracker.state();

    tracker.set_all(true);
    tracker.set_mutated_by_attribute_name(false, "name")?;
    tracker.set_mutated_by_attribute_name(true, "brand.new")?;
    tracker.clear();
    tracker.reset();

    assert_eq!(*tracker.state(), *initial);
    assert_all_flags(&tracker, &["name", "phones.1"], true);
    assert_all_flags(&tracker, &["email", "phones.0", "tags", "brand.new"], false);
    assert_eq!(tracker.leaves().len(), REGISTRATION_LEAVES.len());
    Ok(())
}

#[test]
fn test_seed_is_retained_for_introspection() {
    let tracker = flag_tracker(&small_subject(), &["a.b", "missing"]);
    assert_eq!(
        tracker.initially_mutated_attributes(),
        &["a.b".to_string(), "missing".to_string()]
    );
    assert_eq!(tracker.initially_mutated_value(), Some(&true));
    assert_eq!(tracker.default_value(), &false);

    let unseeded = MutationTracker::new(&small_subject(), TrackerOptions::new(false));
    assert!(unseeded.initially_mutated_attributes().is_empty());
    assert_eq!(unseeded.initially_mutated_value(), None);
}

#[test]
fn test_subject_is_not_mutated_or_rescanned() -> formstate::Result<()> {
    let mut subject = small_subject();
    let mut tracker = flag_tracker(&subject, &[]);
    tracker.set_mutated_by_attribute_name(true, "a.b")?;
    assert_eq!(subject, small_subject());

    subject["a"]["extra"] = json!("later");
    tracker.set_all(true);
    assert!(!*tracker.get_mutated_by_attribute_name("a.extra")?);
    Ok(())
}

#[test]
fn test_write_through_leaf_fails() {
    let mut tracker = flag_tracker(&small_subject(), &[]);
    let err = tracker
        .set_mutated_by_attribute_name(true, "a.b.deeper")
        .unwrap_err();
    assert!(err.is_shape_traversal());
}

#[test]
fn test_malformed_paths_fail_fast() {
    let mut tracker = flag_tracker(&small_subject(), &[]);
    assert!(tracker.get_mutated_by_attribute_name("a..b").unwrap_err().is_path_error());
    assert!(tracker
        .set_mutated_by_attribute_names(true, ["a.b", "a..c"])
        .unwrap_err()
        .is_path_error());
    // Writes before the malformed path stay applied
    assert!(*tracker.get_at(&kp("a.b")));
}

#[test]
fn test_state_serializes_like_subject_shape() {
    let tracker = flag_tracker(&small_subject(), &["a.c.1"]);
    assert_eq!(
        serde_json::to_value(tracker.state()).unwrap(),
        json!({"a": {"b": false, "c": [false, true]}})
    );
}

#[test]
fn test_from_explicit_paths() -> formstate::Result<()> {
    let tracker = MutationTracker::from_paths(
        ["a.b", "a.c.0", "a.c.1"],
        TrackerOptions::new(false).with_initial_mutation(["a.b"], true),
    )?;
    let from_subject = flag_tracker(&small_subject(), &["a.b"]);
    assert_eq!(*tracker.state(), *from_subject.state());
    Ok(())
}

#[test]
fn test_shared_tracker_handles_share_state() -> formstate::Result<()> {
    let shared = SharedTracker::new(&small_subject(), TrackerOptions::new(false));
    let other = shared.clone();

    other.set_mutated_by_attribute_name(true, "a.c.0")?;
    assert!(shared.get_mutated_by_attribute_name("a.c.0")?);

    shared.set_all(true);
    shared.reset();
    assert!(!other.get_mutated_by_attribute_name("a.c.0")?);
    Ok(())
}

#[test]
fn test_empty_subject_grows_dynamically() -> formstate::Result<()> {
    let mut tracker = MutationTracker::new(&json!({}), TrackerOptions::new(false));
    assert!(tracker.leaves().is_empty());
    assert_eq!(serde_json::to_value(tracker.state())?, json!({}));

    tracker.set_mutated_by_attribute_name(true, "name")?;
    assert!(*tracker.get_mutated_by_attribute_name("name")?);
    assert_eq!(serde_json::to_value(tracker.state())?, json!({"name": true}));

    tracker.reset();
    assert_eq!(serde_json::to_value(tracker.state())?, json!({}));

    let mut list = MutationTracker::new(&json!([]), TrackerOptions::new(0u8));
    list.set_mutated_by_attribute_name(4, "1")?;
    assert_eq!(serde_json::to_value(list.state())?, json!([null, 4]));
    Ok(())
}

#[test]
fn test_huge_index_is_an_error() {
    let mut tracker = flag_tracker(&small_subject(), &[]);
    let err = tracker
        .set_mutated_by_attribute_name(true, "a.c.18446744073709551615")
        .unwrap_err();
    assert_eq!(err.module(), "access");

    let err = tracker
        .set_mutated_by_attribute_name(true, "a.c.100000000")
        .unwrap_err();
    assert_eq!(err.module(), "access");
    assert_eq!(tracker.leaves().len(), 3);
}

#[test]
fn test_keys_containing_separator_are_not_tracked() -> formstate::Result<()> {
    let subject = json!({"a.b": 1, "a": {"b": 2}});
    let tracker = flag_tracker(&subject, &[]);
    let paths: Vec<String> = tracker
        .leaves()
        .into_iter()
        .map(|(path, _)| path.to_string())
        .collect();
    assert_eq!(paths, vec!["a.b"]);

    // Under another separator both keys are addressable
    let slashed = MutationTracker::new(&subject, TrackerOptions::new(false).with_separator('/'));
    assert_eq!(slashed.leaves().len(), 2);
    assert!(!*slashed.get_mutated_by_attribute_name("a.b")?);
    Ok(())
}
