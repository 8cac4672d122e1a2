//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod report;
pub mod selector;

pub use report::report_task;
pub use selector::selector_task;
