// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DOCTOR_GROUP, DomainError, GroupName, GroupResolution, MembershipChange, PATIENT_GROUP,
    UserAccount, Username,
};

fn create_test_user(first_name: &str, last_name: &str) -> UserAccount {
    UserAccount {
        user_id: 7,
        username: String::from("patient_li"),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    }
}

#[test]
fn test_username_accepts_application_charset() {
    for value in ["doctor_zhang", "patient.li", "a+b@c-d", "testuser_20250720_104535"] {
        let username: Username = Username::new(value).unwrap();
        assert_eq!(username.as_str(), value);
    }
}

#[test]
fn test_username_accepts_unicode_letters() {
    assert!(Username::new("张医生").is_ok());
}

#[test]
fn test_username_rejects_empty() {
    assert!(matches!(
        Username::new(""),
        Err(DomainError::InvalidUsername { .. })
    ));
}

#[test]
fn test_username_rejects_whitespace_and_symbols() {
    assert!(Username::new("doctor zhang").is_err());
    assert!(Username::new("doctor#1").is_err());
}

#[test]
fn test_username_rejects_overlong_value() {
    let value: String = "a".repeat(151);
    assert!(Username::new(&value).is_err());
    assert!(Username::new(&"a".repeat(150)).is_ok());
}

#[test]
fn test_group_name_keeps_case() {
    let lower: GroupName = GroupName::new("doctor").unwrap();
    let upper: GroupName = GroupName::new(DOCTOR_GROUP).unwrap();
    assert_ne!(lower, upper);
    assert_eq!(upper.to_string(), "DOCTOR");
}

#[test]
fn test_group_name_rejects_blank() {
    assert!(GroupName::new("").is_err());
    assert!(GroupName::new("   ").is_err());
    assert!(GroupName::new(PATIENT_GROUP).is_ok());
}

#[test]
fn test_full_name_joins_first_and_last() {
    assert_eq!(create_test_user("Li", "Ming").full_name(), "Li Ming");
}

#[test]
fn test_full_name_trims_missing_parts() {
    assert_eq!(create_test_user("", "Ming").full_name(), "Ming");
    assert_eq!(create_test_user("Li", "").full_name(), "Li");
    assert_eq!(create_test_user("", "").full_name(), "");
}

#[test]
fn test_outcome_predicates() {
    assert!(GroupResolution::Created.was_created());
    assert!(!GroupResolution::Existing.was_created());
    assert!(MembershipChange::Added.was_added());
    assert!(!MembershipChange::AlreadyMember.was_added());
}

#[test]
fn test_user_account_serializes_field_names() {
    let json: serde_json::Value = serde_json::to_value(create_test_user("Li", "Ming")).unwrap();
    assert_eq!(json["username"], "patient_li");
    assert_eq!(json["first_name"], "Li");
}
