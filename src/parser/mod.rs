mod labels;
mod text;

pub use labels::{validate_locale, LabelReader, RawLabel, RawValue};
pub use text::canonicalize;
