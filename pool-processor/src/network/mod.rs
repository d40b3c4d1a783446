pub mod http;
pub mod stream;
