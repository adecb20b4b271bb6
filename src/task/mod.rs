//! Task listing: fetch from the cluster, order, and render.

pub mod formatter;
pub mod lister;

pub use formatter::{sort_tasks, TableFormatter, EMPTY_MESSAGE};
pub use lister::{list_tasks, Scope};
