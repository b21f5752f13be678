//! # Product Table
//!
//! The orderable catalogue. Each product carries the weekdays it can be ordered on;
//! the window scheduler only opens ordering on days where at least one product is
//! available.
//!
//! ## Structure
//!
//! - [`entity`] - [`Record`](table_actor::Record) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`new()`] - creates the actor and its [`ProductClient`]
//!
//! ## Usage
//!
//! ```rust
//! use kwartvoorbier::product_actor;
//! use kwartvoorbier::model::ProductCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let pils = client.create_product(ProductCreate::new("Pils", [4, 5])).await?;
//!     client.set_availability(pils, Some(vec![5])).await?;
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use table_actor::TableActor;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (TableActor<Product>, ProductClient) {
    let (actor, inner) = TableActor::new(buffer_size);
    (actor, ProductClient::new(inner))
}
