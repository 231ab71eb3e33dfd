// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Username is empty, too long, or contains disallowed characters.
    InvalidUsername {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// Group name is empty or too long.
    InvalidGroupName {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUsername { value, reason } => {
                write!(f, "Invalid username '{value}': {reason}")
            }
            Self::InvalidGroupName { value, reason } => {
                write!(f, "Invalid group name '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
