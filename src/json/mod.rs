//! JSON output: value sinks and event resolvers

pub mod resolver;
pub mod sink;

pub use resolver::{EventResolver, MessageResolver, MessageResolverConfig};
pub use sink::{JsonValueSink, JsonWriter};
