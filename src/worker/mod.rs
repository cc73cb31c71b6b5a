//! Background worker thread for preference storage.
//!
//! The plugin thread never touches the filesystem; it posts a
//! [`WorkerMessage`] and receives a [`WorkerResponse`] as a custom message.
//!
//! # Architecture
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: worker implementation and message dispatch

pub mod handler;
pub mod messages;

pub use handler::ZmealsWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
