//! Row types stored in the tables, plus their insert and update payloads.

/// Declares a `u32` newtype id that the table actors can allocate.
macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

pub mod feature_request;
pub mod location;
pub mod order;
pub mod product;
pub mod profile;
pub mod setting;

pub use feature_request::*;
pub use location::*;
pub use order::*;
pub use product::*;
pub use profile::*;
pub use setting::*;
