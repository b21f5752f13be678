//! # Record Trait
//!
//! The `Record` trait is the contract every row type (Product, Location, Order, …) implements
//! so a generic [`TableActor`](crate::TableActor) can own a table of them. It fixes the
//! associated types for ids, payloads, actions, context and errors, and offers lifecycle
//! hooks (`on_create`, `on_update`, `on_delete`, `handle_action`).
//!
//! # Provided Methods (Hooks)
//! - [`Record::on_create`]
//! - [`Record::on_delete`]
//! - [`Record::sort_key`]
//!
//! The defaults do nothing (`Ok(())`), and `sort_key` returns `0` so tables without an
//! explicit ordering list their rows by id.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A row that can live in a [`TableActor`](crate::TableActor).
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can await other tables (an order checks that its
/// product exists). The `Context` is handed to `run()`, not `new()`, which lets tables
/// that reference each other be wired after all of them exist.
#[async_trait]
pub trait Record: Clone + Send + Sync + 'static {
    /// Row identifier. Generated from a per-table `u32` sequence starting at 1.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Insert payload.
    type Create: Send + Sync + Debug;

    /// Update payload.
    type Update: Send + Sync + Debug;

    /// Row-specific operations that don't fit CRUD.
    type Action: Send + Sync + Debug;

    /// Result type of [`Record::Action`].
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected at `run()`. Use `()` if none.
    type Context: Send + Sync;

    /// One error enum per table rather than per operation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the row from its freshly allocated id and the insert payload.
    /// Runs synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Primary ordering key for `list()`. Ties are broken by id.
    fn sort_key(&self) -> i64 {
        0
    }

    /// Called after the row is built, before it is stored. Failing here rejects the insert.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update payload in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the row is removed. Failing here keeps the row.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
