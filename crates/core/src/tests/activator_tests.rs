// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_patient, create_test_persistence};
use crate::{
    ActivationMode, AdminError, activate, activate_all_patients, activate_latest_patient,
};

#[test]
fn test_activate_latest_without_inactive_patients_fails_without_mutation() {
    let mut persistence = create_test_persistence();
    let active = create_test_patient(&mut persistence, "active_one", true);

    let result = activate_latest_patient(&mut persistence);

    assert_eq!(result, Err(AdminError::NoInactivePatients));
    assert!(persistence.get_patient_by_id(active).unwrap().unwrap().status);
}

#[test]
fn test_activate_latest_on_empty_database_fails() {
    let mut persistence = create_test_persistence();
    assert_eq!(
        activate_latest_patient(&mut persistence),
        Err(AdminError::NoInactivePatients)
    );
}

#[test]
fn test_activate_latest_activates_only_highest_id() {
    let mut persistence = create_test_persistence();
    let first = create_test_patient(&mut persistence, "first", false);
    let second = create_test_patient(&mut persistence, "second", false);
    let third = create_test_patient(&mut persistence, "third", false);

    let report = activate_latest_patient(&mut persistence).unwrap();

    assert_eq!(report.mode, ActivationMode::Latest);
    assert_eq!(report.count(), 1);
    assert_eq!(report.activated[0].patient_id, third);
    assert_eq!(report.activated[0].user.username, "third");
    assert!(!persistence.get_patient_by_id(first).unwrap().unwrap().status);
    assert!(!persistence.get_patient_by_id(second).unwrap().unwrap().status);
    assert_eq!(persistence.count_inactive_patients().unwrap(), 2);
}

#[test]
fn test_repeated_single_activation_walks_backwards() {
    let mut persistence = create_test_persistence();
    let first = create_test_patient(&mut persistence, "first", false);
    let second = create_test_patient(&mut persistence, "second", false);

    let a = activate_latest_patient(&mut persistence).unwrap();
    let b = activate_latest_patient(&mut persistence).unwrap();

    assert_eq!(a.activated[0].patient_id, second);
    assert_eq!(b.activated[0].patient_id, first);
    assert_eq!(
        activate_latest_patient(&mut persistence),
        Err(AdminError::NoInactivePatients)
    );
}

#[test]
fn test_activate_all_activates_every_inactive_patient() {
    let mut persistence = create_test_persistence();
    create_test_patient(&mut persistence, "a", false);
    create_test_patient(&mut persistence, "b", false);
    create_test_patient(&mut persistence, "c", false);
    create_test_patient(&mut persistence, "already", true);

    let report = activate_all_patients(&mut persistence).unwrap();

    assert_eq!(report.mode, ActivationMode::All);
    assert_eq!(report.count(), 3);
    let usernames: Vec<&str> = report
        .activated
        .iter()
        .map(|p| p.user.username.as_str())
        .collect();
    assert_eq!(usernames, vec!["a", "b", "c"]);
    assert_eq!(persistence.count_inactive_patients().unwrap(), 0);
}

#[test]
fn test_activate_all_with_none_pending_fails_without_mutation() {
    let mut persistence = create_test_persistence();
    let active = create_test_patient(&mut persistence, "active_one", true);

    assert_eq!(
        activate_all_patients(&mut persistence),
        Err(AdminError::NoInactivePatients)
    );
    assert!(persistence.get_patient_by_id(active).unwrap().unwrap().status);
}

#[test]
fn test_activate_dispatches_on_mode() {
    let mut persistence = create_test_persistence();
    create_test_patient(&mut persistence, "a", false);
    create_test_patient(&mut persistence, "b", false);

    let latest = activate(&mut persistence, ActivationMode::Latest).unwrap();
    assert_eq!(latest.count(), 1);

    let all = activate(&mut persistence, ActivationMode::All).unwrap();
    assert_eq!(all.count(), 1);
    assert_eq!(all.activated[0].user.username, "a");
}

#[test]
fn test_default_mode_is_latest() {
    assert_eq!(ActivationMode::default(), ActivationMode::Latest);
}

#[test]
fn test_no_inactive_reason_code() {
    assert_eq!(
        AdminError::NoInactivePatients.reason_code(),
        "no_inactive_patients"
    );
}
