pub mod executor;
pub mod font;

pub use executor::{Executor, SyncExecutor};
pub use font::{
    FontError, FontProvider, FontQuery, FontWeight, InMemoryFontProvider, SharedFontData,
};
