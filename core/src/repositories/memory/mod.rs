//! In-process implementation of every repository trait.
//!
//! Backs `STORAGE_BACKEND=memory` and the test suites. All tables live
//! behind one lock so cascading deletes are atomic.

mod store;


pub use store::InMemoryStore;
