// crates/locodb-core/src/prelude.rs
pub use crate::config::{SearchConfig, SearchConfigBuilder};
pub use crate::db::Database;
pub use crate::error::{LocoError, Result};
pub use crate::model::{Coordinates, DbStats, Level, Location, MatchInfo};
pub use crate::raw::{BoundaryDoc, CountryRaw, LocodeRecord, PlaceRaw, SubdivisionRaw};
pub use crate::search::SearchResult;
pub use crate::store::LocationView;
