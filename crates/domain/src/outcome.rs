// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Whether a get-or-create lookup found an existing group or made one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupResolution {
    /// The group did not exist and was inserted.
    Created,
    /// The group already existed.
    Existing,
}

impl GroupResolution {
    /// Returns `true` if the group was inserted by this lookup.
    #[must_use]
    pub const fn was_created(self) -> bool {
        matches!(self, Self::Created)
    }
}

/// Result of adding a user to a group.
///
/// Adding a user that is already a member is not an error; it is reported
/// as `AlreadyMember` and leaves the membership table untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipChange {
    /// A new membership row was written.
    Added,
    /// The user was already a member.
    AlreadyMember,
}

impl MembershipChange {
    /// Returns `true` if a membership row was written.
    #[must_use]
    pub const fn was_added(self) -> bool {
        matches!(self, Self::Added)
    }
}
