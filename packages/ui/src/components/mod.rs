//! Building blocks shared by every screen.

mod button;
pub use button::{Button, ButtonVariant};

mod field;
pub use field::{FieldInput, Select};

mod modal;
pub use modal::{ConfirmDialog, ModalOverlay};

mod pager;
pub use pager::Pager;

mod table;
pub use table::{DataTable, StatusChip};
