//! Typed wrappers around [`TableClient`](table_actor::TableClient), one per table.
//!
//! Each wrapper implements [`TableAccess`](table_actor::TableAccess) for the shared
//! `get` / `list` / `delete` / `subscribe` calls and adds the domain operations of its
//! table on top.

pub mod feature_request_client;
pub mod location_client;
pub mod order_client;
pub mod product_client;
pub mod profile_client;
pub mod settings_client;

pub use feature_request_client::*;
pub use location_client::*;
pub use order_client::*;
pub use product_client::*;
pub use profile_client::*;
pub use settings_client::*;
