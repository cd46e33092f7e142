//! Newtype wrappers for domain identifiers.
//!
//! Every Foodgram table uses a serial `integer` primary key, so all ids wrap `i32`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! int_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }
    };
}

int_id!(
    /// Identifies a user account (also used for recipe authors).
    UserId
);
int_id!(
    /// Identifies a published recipe.
    RecipeId
);
int_id!(
    /// Identifies a tag.
    TagId
);
int_id!(
    /// Identifies an ingredient in the reference catalogue.
    IngredientId
);
