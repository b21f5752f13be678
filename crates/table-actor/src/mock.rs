//! # Mock Tables & Testing Guide
//!
//! [`MockTable<T>`] hands out a real [`TableClient<T>`] whose requests are answered from a
//! queue of scripted expectations instead of a running [`TableActor`](crate::TableActor).
//! Use it to test code that sits *around* a client (a typed wrapper, a hook that calls
//! another table) without spawning the dependency.
//!
//! | | MockTable | Real TableActor |
//! |---|---|---|
//! | **State** | none, replies are scripted | real rows |
//! | **Determinism** | full | subject to the scheduler |
//! | **Error injection** | `return_err` | needs a crafted state |
//!
//! ```rust
//! use table_actor::mock::MockTable;
//! use table_actor::{Record, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Crate { id: u32, bottles: u32 }
//! #[derive(Debug)] struct CrateCreate;
//! #[derive(Debug)] struct CrateUpdate;
//! #[derive(Debug)] enum CrateAction {}
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct CrateError;
//!
//! #[async_trait]
//! impl Record for Crate {
//!     type Id = u32; type Create = CrateCreate; type Update = CrateUpdate;
//!     type Action = CrateAction; type ActionResult = (); type Context = (); type Error = CrateError;
//!     fn from_create_params(id: u32, _: CrateCreate) -> Result<Self, Self::Error> { Ok(Self { id, bottles: 24 }) }
//!     async fn on_update(&mut self, _: CrateUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: CrateAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockTable::<Crate>::new();
//!     mock.expect_get(1).return_ok(Some(Crate { id: 1, bottles: 24 }));
//!     mock.expect_list().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(1).await.unwrap().unwrap().bottles, 24);
//!     assert!(matches!(client.list().await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For step-by-step control, [`create_mock_client`] returns the raw request receiver and
//! the `expect_*` helpers pull the next request off it.

use crate::change::Change;
use crate::client::TableClient;
use crate::error::FrameworkError;
use crate::message::TableRequest;
use crate::record::Record;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, mpsc, oneshot};

enum Expectation<T: Record> {
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn check_id<I: PartialEq + std::fmt::Debug>(op: &str, expected: &I, got: &I) {
    assert_eq!(expected, got, "{op} issued for an unexpected id");
}

/// A scripted stand-in for a table.
///
/// Requests are matched in FIFO order against the queued expectations. A request of
/// the wrong kind, or for a different id, panics the mock task; the caller then sees
/// `FrameworkError::ActorDropped`.
pub struct MockTable<T: Record> {
    client: TableClient<T>,
    expectations: Queue<T>,
    changes: broadcast::Sender<Change<T>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Record> Default for MockTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MockTable<T> {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<TableRequest<T>>(100);
        let (changes, _) = broadcast::channel(16);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                match (request, next) {
                    (TableRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (TableRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        check_id("get", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (TableRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: want, response }),
                    ) => {
                        check_id("update", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (TableRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
                        check_id("delete", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) => {
                        check_id("action", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!(
                            "Unexpected request or expectation mismatch: {}",
                            request.op()
                        );
                    }
                }
            }
        });

        Self {
            client: TableClient::new(sender, changes.clone()),
            expectations,
            changes,
            _handle: handle,
        }
    }

    pub fn client(&self) -> TableClient<T> {
        self.client.clone()
    }

    /// Pushes a change to every subscriber of [`MockTable::client`].
    pub fn emit(&self, change: Change<T>) {
        let _ = self.changes.send(change);
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations.lock().unwrap().push_back(expectation);
    }

    pub fn expect_create(&mut self) -> Expect<'_, T, T::Id> {
        Expect::new(self, |response| Expectation::Create { response })
    }

    pub fn expect_get(&mut self, id: T::Id) -> Expect<'_, T, Option<T>> {
        Expect::new(self, move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> Expect<'_, T, Vec<T>> {
        Expect::new(self, |response| Expectation::List { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> Expect<'_, T, T> {
        Expect::new(self, move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> Expect<'_, T, ()> {
        Expect::new(self, move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> Expect<'_, T, T::ActionResult> {
        Expect::new(self, move |response| Expectation::Action { id, response })
    }

    /// Panics if any expectation was never consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Finishes an expectation with its scripted reply.
pub struct Expect<'a, T: Record, R> {
    mock: &'a MockTable<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'a>,
}

impl<'a, T: Record, R> Expect<'a, T, R> {
    fn new(
        mock: &'a MockTable<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'a,
    ) -> Self {
        Self {
            mock,
            build: Box::new(build),
        }
    }

    pub fn return_ok(self, value: R) {
        self.mock.push((self.build)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.build)(Err(error)));
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// A client wired to a bare receiver, for tests that answer requests by hand.
pub fn create_mock_client<T: Record>(
    buffer_size: usize,
) -> (TableClient<T>, mpsc::Receiver<TableRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (changes, _) = broadcast::channel(16);
    (TableClient::new(sender, changes), receiver)
}

pub async fn expect_create<T: Record>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(TableRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

pub async fn expect_list<T: Record>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<oneshot::Sender<Result<Vec<T>, FrameworkError>>> {
    match receiver.recv().await {
        Some(TableRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_update<T: Record>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(TableRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

pub async fn expect_action<T: Record>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(TableRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
