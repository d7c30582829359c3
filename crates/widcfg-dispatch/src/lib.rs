//! Inbound configuration frame handling.
//!
//! [`dispatch`] classifies a received frame by its type tag, applies response
//! and info records to a [`ConfigTable`](widcfg_table::ConfigTable), and hands
//! back any asynchronous event for the caller to route to an [`EventSink`].

pub mod decoder;
pub mod dispatcher;
pub mod error;
pub mod sink;

pub use decoder::{parse_info, parse_response, ResponseSummary};
pub use dispatcher::{
    dispatch, dispatch_to, AsyncEvent, CfgResponse, Dispatch, MessageType, ResponseKind,
};
pub use error::{DispatchError, Result};
pub use sink::{EventSink, NullSink};
