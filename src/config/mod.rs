mod loader;

pub use loader::{ComponentEntry, Config};
