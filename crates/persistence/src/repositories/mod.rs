//! Repository implementations over the document store.

pub mod collection;
pub mod settings;

pub use collection::{CollectionRepository, ListQuery};
pub use settings::SettingsRepository;
