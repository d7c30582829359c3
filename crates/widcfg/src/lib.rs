//! Configuration frames for a WID-addressed wireless firmware interface.
//!
//! widcfg encodes outgoing configuration records, decodes response and info
//! frames into a typed parameter table, and routes asynchronous
//! notifications to a caller-supplied sink.
//!
//! # Crate Structure
//!
//! - [`frame`]: WID model, TLV record codec, frame writer and record reader
//! - [`table`]: Seeded configuration table of typed parameter slots
//! - [`dispatch`]: Inbound frame classification and event delivery

/// Re-export frame types.
pub mod frame {
    pub use widcfg_frame::*;
}

/// Re-export table types.
pub mod table {
    pub use widcfg_table::*;
}

/// Re-export dispatch types.
pub mod dispatch {
    pub use widcfg_dispatch::*;
}
