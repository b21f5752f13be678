//! # Table Actor
//!
//! In-memory tables served by actors. Each row type gets its own [`TableActor`], a Tokio
//! task that owns the rows and processes requests one at a time, and any number of cheap
//! [`TableClient`] handles that talk to it over channels.
//!
//! On top of plain CRUD a table offers:
//!
//! - an ordered `list()` (by [`Record::sort_key`], then id)
//! - a broadcast change stream ([`Change`]) so views can stay in sync without polling
//! - row-specific actions for operations that don't fit CRUD
//!
//! ## Layers
//!
//! 1. **Row** ([`Record`]) - the domain type and its hooks
//! 2. **Runtime** ([`TableActor`]) - the sequential request loop
//! 3. **Interface** ([`TableClient`], [`TableAccess`]) - typed async calls
//!
//! ```rust
//! use table_actor::{Record, TableActor, Change};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Beer {
//!     id: u32,
//!     name: String,
//!     position: i64,
//! }
//!
//! #[derive(Debug)] struct BeerCreate { name: String, position: i64 }
//! #[derive(Debug)] struct BeerUpdate { name: Option<String> }
//! #[derive(Debug)] enum BeerAction {}
//! #[derive(Debug)] struct BeerError(String);
//!
//! impl std::fmt::Display for BeerError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
//! }
//! impl std::error::Error for BeerError {}
//!
//! #[async_trait]
//! impl Record for Beer {
//!     type Id = u32;
//!     type Create = BeerCreate;
//!     type Update = BeerUpdate;
//!     type Action = BeerAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = BeerError;
//!
//!     fn from_create_params(id: u32, p: BeerCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, name: p.name, position: p.position })
//!     }
//!
//!     fn sort_key(&self) -> i64 { self.position }
//!
//!     async fn on_update(&mut self, update: BeerUpdate, _: &()) -> Result<(), Self::Error> {
//!         if let Some(name) = update.name { self.name = name; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, _: BeerAction, _: &()) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = TableActor::<Beer>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let mut changes = client.subscribe();
//!     client.create(BeerCreate { name: "Tripel".into(), position: 2 }).await.unwrap();
//!     client.create(BeerCreate { name: "Pils".into(), position: 1 }).await.unwrap();
//!
//!     let names: Vec<_> = client.list().await.unwrap().into_iter().map(|b| b.name).collect();
//!     assert_eq!(names, ["Pils", "Tripel"]);
//!     assert!(matches!(changes.recv().await.unwrap(), Change::Inserted(_)));
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are handed to `run()`, not `new()`. All actors are created first, then
//! each is started with the clients it needs, so tables can reference each other.
//!
//! ## Testing
//!
//! [`mock::MockTable`] answers a real `TableClient<T>` from scripted expectations, so
//! wrappers and hooks can be tested without a running actor.

pub mod actor;
pub mod change;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;

pub use actor::TableActor;
pub use change::Change;
pub use client::TableClient;
pub use client_trait::TableAccess;
pub use error::FrameworkError;
pub use message::{Response, TableRequest};
pub use record::Record;
