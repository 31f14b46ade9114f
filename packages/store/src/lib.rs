//! Platform-independent state for the Streamline console.
//!
//! Nothing in this crate talks to the network or renders anything. It holds the
//! rules the screens follow (paging, debouncing, drafts, exports, order totals
//! and ticket projections) so they can be exercised without a browser.

pub mod bulk;
pub mod config;
pub mod csv_export;
pub mod debounce;
pub mod draft;
pub mod entity;
pub mod error;
pub mod models;
pub mod new_order;
pub mod notification;
pub mod order;
pub mod query;
pub mod sequence;
pub mod session;
pub mod sla;

mod memory;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;

pub use bulk::{BulkEdit, BulkSubmission, Selection};
pub use config::ConsoleConfig;
pub use debounce::Debouncer;
pub use draft::{Draft, Record, Submission};
pub use entity::{Column, EntityConfig, FieldKind, FieldSpec, FilterOptions, FilterSpec};
pub use error::StoreError;
pub use new_order::{LineItem, NewOrder, OrderTotals};
pub use notification::{ErrorPolicy, Notification, NotificationCenter, Severity};
pub use order::{OrderStatus, OrderWorkflow};
pub use query::{ListState, ListUpdate, PageRequest, PageResult};
pub use sequence::{RequestSequence, RequestToken};
pub use session::{Session, SessionStorage};
pub use sla::{SlaSnapshot, SlaTier};
