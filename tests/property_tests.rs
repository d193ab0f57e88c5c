//! Property-based tests for core invariants.
//!
//! These tests use proptest to verify that build-number derivation, the
//! lock store, and project gating hold across randomly generated inputs.

use std::collections::BTreeMap;

use proptest::prelude::*;
use tempfile::TempDir;

use hitch::core::dependency::Dependency;
use hitch::core::project::Project;
use hitch::core::state::{self, DepState};
use hitch::vcs::compose_build_number;
use hitch::vcs::mock::MockVcs;

/// Strategy for generating full 40-character hex revisions.
fn full_revision() -> impl Strategy<Value = String> {
    "[0-9a-f]{40}"
}

/// Strategy for generating dependency names as they appear in manifests.
fn dependency_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_-]{0,12}"
}

/// Strategy for generating a set of uniquely named dependencies, each
/// flagged with an arbitrary boolean.
fn flagged_names() -> impl Strategy<Value = BTreeMap<String, bool>> {
    prop::collection::btree_map(dependency_name(), any::<bool>(), 1..8)
}

/// Build a project of mock-backed dependencies, returning the live mock
/// handles alongside it.
fn mock_project(root: &TempDir, names: &BTreeMap<String, bool>) -> (Project, Vec<MockVcs>) {
    let mut mocks = Vec::new();
    let mut deps = Vec::new();
    for name in names.keys() {
        let vcs = MockVcs::new();
        mocks.push(vcs.clone());
        deps.push(Dependency::with_backend(name.clone(), "main", Box::new(vcs)));
    }
    (Project::from_dependencies(root.path(), deps), mocks)
}

proptest! {
    /// The build number is always `{count}` and the decimal value of the
    /// revision's first three hex characters, joined by a dot.
    #[test]
    fn build_number_matches_independent_derivation(
        count in 0u64..1_000_000,
        revision in full_revision(),
    ) {
        let version = compose_build_number(count, &revision).unwrap();
        let decimal = u32::from_str_radix(&revision[..3], 16).unwrap();
        prop_assert_eq!(version, format!("{}.{}", count, decimal));
    }

    /// Revisions shorter than three characters never produce a build number.
    #[test]
    fn build_number_rejects_short_revisions(revision in "[0-9a-f]{0,2}") {
        prop_assert!(compose_build_number(1, &revision).is_err());
    }

    /// Whatever goes into the lock store comes back out unchanged.
    #[test]
    fn lock_store_round_trips(
        entries in prop::collection::btree_map(
            dependency_name(),
            (full_revision(), prop::option::of("[0-9T:+-]{10,25}")),
            1..8,
        ),
    ) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hitch.lock");

        let states: BTreeMap<String, DepState> = entries
            .into_iter()
            .map(|(name, (revision, date))| (name, DepState { revision, date }))
            .collect();

        state::write_states(&path, states.iter().map(|(n, s)| (n.as_str(), s))).unwrap();
        let raw = state::read_states(&path).unwrap();

        prop_assert_eq!(raw.len(), states.len());
        for (name, dep_state) in &states {
            let entry = &raw[name];
            prop_assert_eq!(entry.revision.as_deref(), Some(dep_state.revision.as_str()));
            prop_assert_eq!(entry.date.as_deref(), dep_state.date.as_deref());
        }
    }

    /// Lock entries come out sorted case-insensitively no matter the
    /// declaration order.
    #[test]
    fn recorded_lock_is_sorted_case_insensitively(names in flagged_names()) {
        let dir = TempDir::new().unwrap();
        let (project, _mocks) = mock_project(&dir, &names);

        let lock_path = project.record_states().unwrap();
        let text = std::fs::read_to_string(&lock_path).unwrap();
        let document: serde_json::Value = serde_json::from_str(&text).unwrap();

        let keys: Vec<String> = document
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        let mut sorted = keys.clone();
        sorted.sort_by_key(|name| name.to_lowercase());
        prop_assert_eq!(keys, sorted);
    }

    /// Exactly the absent working copies are reported missing, in
    /// declaration order.
    #[test]
    fn missing_dependencies_mirror_the_backends(names in flagged_names()) {
        let dir = TempDir::new().unwrap();
        let (project, mocks) = mock_project(&dir, &names);
        for (vcs, present) in mocks.iter().zip(names.values()) {
            vcs.set_exists(*present);
        }

        let reported: Vec<&str> = project
            .missing_dependencies()
            .iter()
            .map(|d| d.name())
            .collect();
        let expected: Vec<&str> = names
            .iter()
            .filter(|(_, present)| !**present)
            .map(|(name, _)| name.as_str())
            .collect();
        prop_assert_eq!(reported, expected);
    }

    /// Exactly the dirty working copies are reported uncommitted, and a
    /// failed gate names each one.
    #[test]
    fn uncommitted_gate_names_every_offender(names in flagged_names()) {
        let dir = TempDir::new().unwrap();
        let (project, mocks) = mock_project(&dir, &names);
        for (vcs, dirty) in mocks.iter().zip(names.values()) {
            vcs.set_uncommitted(*dirty);
        }

        let reported: Vec<String> = project
            .uncommitted_dependencies()
            .unwrap()
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        let expected: Vec<&str> = names
            .iter()
            .filter(|(_, dirty)| **dirty)
            .map(|(name, _)| name.as_str())
            .collect();
        prop_assert_eq!(&reported, &expected);

        match project.fail_if_uncommitted_dependencies() {
            Ok(()) => prop_assert!(expected.is_empty()),
            Err(err) => {
                let message = err.to_string();
                for name in &expected {
                    prop_assert!(message.contains(name), "{} not named in: {}", name, message);
                }
            }
        }
    }
}
