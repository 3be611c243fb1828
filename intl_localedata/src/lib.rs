//! Compiled CLDR locale-data store (component C2): the dynamic-typed data
//! tree, inheritance merge, alias resolution, and the global cross-locale
//! tables (component boundary consumed by C3–C7).

mod error;
mod global;
mod store;
mod value;

pub use error::LocaleDataError;
pub use global::{CurrencyFraction, GlobalData, MetaZonePeriod, TerritoryCurrency, TerritoryLanguage};
pub use store::{FsLocaleDataSource, LocaleData, LocaleDataSource, LocaleDataStore};
pub use value::{merge, Data, ALIAS_MARKER_KEY, NO_INHERIT_SENTINEL};
