//! Question navigation: tab filters, per-tab cursors, move resolution and
//! the controller that ties them to one practice session.

mod controller;
mod counter;
mod cursor;
mod filter;
mod lock;
mod resolver;
mod tab;

pub use controller::{Navigation, NavigationController, OptionToggle, PendingWrite};
pub use counter::{DisplayLabel, compute_label};
pub use cursor::{Cursor, TabCursorStore};
pub use filter::{Subsequences, compute_subsequences};
pub use lock::{NavigationLock, NavigationPermit};
pub use resolver::{Resolution, cross_topic_incorrect, resolve_for_tab, resolve_index, resolve_next};
pub use tab::Tab;
