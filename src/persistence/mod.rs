pub mod sink;

pub use sink::{JsonLinesSink, MemorySink, ReviewSink};
