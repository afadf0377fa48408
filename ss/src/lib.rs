//! SchedStore - two-slot in-memory state store
//!
//! Holds exactly two named instances of a value: the *working* instance
//! (in progress, may be incomplete) and the *final* instance (confirmed
//! complete). Loading a slot that was never saved yields the value's
//! `Default`, so downstream code never branches on "does a value exist."
//!
//! The store does not scope by user or session. Callers that serve multiple
//! sessions concurrently are responsible for keyed isolation and for
//! serializing mutations (one store, one in-flight mutation at a time).
//!
//! # Example
//!
//! ```ignore
//! use schedstore::{Slot, Store};
//!
//! let mut store: Store<Schedule> = Store::new();
//! store.save(schedule, Slot::Working);
//! let working = store.load(Slot::Working);
//! store.reset();
//! ```

mod store;

pub use store::{Slot, SnapshotError, Store, now_ms};
