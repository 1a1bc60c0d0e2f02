pub mod config;
pub mod error;
pub mod model;
pub mod network;
pub mod response;
pub mod sources;

pub mod prelude {
    pub use crate::error::*;
    pub use crate::model::*;
    pub use crate::response::Response;
    pub use crate::sources::{CatalogSource, SourceInterface, SourceRegistry};
}
