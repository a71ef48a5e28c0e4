pub mod error;
pub mod pipe;
pub mod stream;
pub mod stream_configuration;

pub use error::{ConfigError, StreamError, StreamResult};
pub use stream::{Progression, Source, Stream, StreamState, Streamable, Truthy};
pub use stream_configuration::{BufferConfig, StreamConfig};
