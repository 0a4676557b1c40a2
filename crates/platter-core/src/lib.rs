pub mod discography;
pub mod errors;
pub mod ports;

pub use discography::{CatalogEntity, FileType, QualityLevel};
pub use errors::CoreError;
pub use ports::{Batch, Sink, SinkError};
