//! Rendering-agnostic client core: navigation, state and view controllers.

pub mod controller;
pub mod history;
pub mod router;
pub mod storage;
pub mod store;
pub mod surface;

pub use controller::App;
pub use router::{Router, View, DEFAULT_ROUTE, LOGIN_ROUTE};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{Snapshot, StateChange, Store};
pub use surface::{Content, Region, Renderer, SharedSurface, Surface, TransactionRow};
