//! Remote quote source: bounded batch fetch and best-effort push.

mod http_source;
mod source;

pub use http_source::HttpRemoteSource;
pub use source::{NoopSource, PushAck, RemoteSource};
