mod entry;
mod session;

pub use entry::{LabelEntry, LabelKey, LabelValue, KEY_SEPARATOR};
pub use session::{MergeSession, QueryFilter};
