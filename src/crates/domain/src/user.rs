use crate::value::{Owner, UserId};

/// The user a request is made for, with the owner identity they manage when they have one.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub owner: Option<Owner>,
}

impl CurrentUser {
    pub fn new(user_id: impl Into<UserId>, owner: Option<Owner>) -> Self {
        Self {
            user_id: user_id.into(),
            owner,
        }
    }
}
