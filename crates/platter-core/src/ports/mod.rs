pub mod sink;

pub use sink::{Batch, Sink, SinkError};
