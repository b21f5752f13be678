//! # Order Table
//!
//! Today's drinks. An order only names who, what and where; on insert the table resolves
//! the customer name from the profile, checks that the product can be ordered on the
//! current weekday and that the location exists, and stamps `created_at`.
//!
//! ## Structure
//!
//! - [`entity`] - [`Record`](table_actor::Record) implementation and [`OrderContext`]
//! - [`actions`] - [`OrderAction`] toggles used by the pickup screen
//! - [`error`] - [`OrderError`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, orders) = order_actor::new(32);
//! tokio::spawn(actor.run(OrderContext {
//!     profiles: profiles.clone(),
//!     products: products.clone(),
//!     locations: locations.clone(),
//!     clock: clock.clone(),
//! }));
//!
//! let id = orders.create_order(OrderCreate { user_id, product_id, location_id }).await?;
//! orders.toggle_collected(id).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::OrderContext;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use table_actor::TableActor;

/// Creates a new Order actor and its client. Run it with an [`OrderContext`].
pub fn new(buffer_size: usize) -> (TableActor<Order>, OrderClient) {
    let (actor, inner) = TableActor::new(buffer_size);
    (actor, OrderClient::new(inner))
}
