pub mod binding;
pub mod config;
pub mod error;
pub mod i18n;
pub mod locale;
pub mod preference;
pub mod server;
pub mod source;

pub use i18n::{LanguageChanged, LanguageCode, Resolution, TranslationTree, Translator};
