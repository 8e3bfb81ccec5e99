pub mod analyzer;
#[cfg(feature = "analyzer-grpc")]
pub mod grpc_analyzer;
#[cfg(feature = "analyzer-grpc")]
pub mod proto;
