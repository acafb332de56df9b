pub mod aggregate;
pub mod cache;
pub mod error;
pub mod http;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod source;
