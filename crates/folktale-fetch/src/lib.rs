//! Folktale Fetch — HTTP implementation of the `ResourceSource` port.

pub mod http_resource_source;

pub use http_resource_source::HttpResourceSource;
