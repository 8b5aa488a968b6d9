// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use thiserror::Error;

/// Reply sent to a chat whose user is not on the allow-list.
pub const ACCESS_DENIED_MESSAGE: &str = "⛔️ Доступ заборонено.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("user {0} is not on the allow-list")]
pub struct AccessDenied(pub i64);

#[derive(Debug, Clone, Default)]
pub struct AccessList {
    allowed: HashSet<i64>,
}

impl AccessList {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            allowed: ids.into_iter().collect(),
        }
    }

    pub fn is_allowed(&self, user_id: i64) -> bool {
        self.allowed.contains(&user_id)
    }

    pub fn check(&self, user_id: i64) -> Result<(), AccessDenied> {
        if self.is_allowed(user_id) {
            Ok(())
        } else {
            Err(AccessDenied(user_id))
        }
    }
}
