use std::fmt::{self, Display};

// Helper macro to define string identity newtypes and common trait impls
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(UserId);
define_id!(Owner);
define_id!(MediaId);

/// Albums are identified by their owner and a folder name unique within that owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlbumId {
    pub owner: Owner,
    pub folder_name: String,
}

impl AlbumId {
    pub fn new(owner: impl Into<Owner>, folder_name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            folder_name: folder_name.into(),
        }
    }

    /// Both parts must be set for the id to address a stored row.
    /// The owner is a key segment of the view and never contains `#`.
    pub fn is_valid(&self) -> bool {
        !self.owner.is_empty()
            && !self.owner.as_str().contains('#')
            && !self.folder_name.is_empty()
    }
}

impl Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.folder_name)
    }
}

/// A user's relationship to one album: either owner or visitor, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Availability {
    pub user_id: UserId,
    pub as_owner: bool,
}

impl Availability {
    pub fn owner(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            as_owner: true,
        }
    }

    pub fn visitor(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            as_owner: false,
        }
    }
}

impl Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.as_owner {
            write!(f, "owner:{}", self.user_id)
        } else {
            write!(f, "visitor:{}", self.user_id)
        }
    }
}
