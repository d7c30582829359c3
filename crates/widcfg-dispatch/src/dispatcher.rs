use tracing::debug;
use widcfg_frame::decode_header;
use widcfg_table::ConfigTable;

use crate::decoder::{parse_info, parse_response, ResponseSummary};
use crate::error::Result;
use crate::sink::EventSink;

/// Inbound message class, from the first header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// `'R'`: configuration response records.
    Response,
    /// `'I'`: status information.
    Info,
    /// `'N'`: network information.
    NetworkInfo,
    /// `'S'`: scan completion notification.
    ScanComplete,
    /// Any other tag.
    Unknown(u8),
}

impl MessageType {
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            b'R' => Self::Response,
            b'I' => Self::Info,
            b'N' => Self::NetworkInfo,
            b'S' => Self::ScanComplete,
            other => Self::Unknown(other),
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            Self::Response => b'R',
            Self::Info => b'I',
            Self::NetworkInfo => b'N',
            Self::ScanComplete => b'S',
            Self::Unknown(tag) => tag,
        }
    }
}

/// What kind of reply a frame completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseKind {
    /// No configuration reply.
    #[default]
    Unset,
    /// Reply to a configuration request.
    Cfg,
    /// Status report.
    Status,
}

/// Reply classification handed back to the request path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CfgResponse {
    pub kind: ResponseKind,
    pub seq_no: u8,
}

/// Asynchronous event carried by a frame. Holds the whole inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncEvent<'a> {
    GeneralAsyncInfo(&'a [u8]),
    NetworkInfo(&'a [u8]),
    ScanComplete(&'a [u8]),
}

impl AsyncEvent<'_> {
    /// Hand the event to the matching sink method.
    pub fn deliver<S: EventSink + ?Sized>(&self, sink: &mut S) {
        match *self {
            Self::GeneralAsyncInfo(frame) => sink.on_general_async_info(frame),
            Self::NetworkInfo(frame) => sink.on_network_info(frame),
            Self::ScanComplete(frame) => sink.on_scan_complete(frame),
        }
    }

    /// The inbound frame, header included.
    pub fn frame(&self) -> &[u8] {
        match *self {
            Self::GeneralAsyncInfo(frame) | Self::NetworkInfo(frame) | Self::ScanComplete(frame) => {
                frame
            }
        }
    }
}

/// Result of dispatching one inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch<'a> {
    pub message_type: MessageType,
    pub response: CfgResponse,
    pub event: Option<AsyncEvent<'a>>,
    /// Decoding outcome for response frames.
    pub summary: Option<ResponseSummary>,
}

impl Dispatch<'_> {
    /// Route the event, if any, to `sink`.
    pub fn deliver<S: EventSink + ?Sized>(&self, sink: &mut S) {
        if let Some(event) = &self.event {
            event.deliver(sink);
        }
    }
}

/// Classify an inbound frame and apply it to `table`.
///
/// Response frames update the table from every record; info frames update the
/// status slot and also produce a general-async-info event. Network-info and
/// scan frames leave the table alone and only produce events. Unknown tags
/// produce a response carrying just the sequence number.
pub fn dispatch<'a>(table: &mut ConfigTable, frame: &'a [u8]) -> Result<Dispatch<'a>> {
    let (header, payload) = decode_header(frame)?;
    let message_type = MessageType::from_tag(header.msg_type);

    let mut out = Dispatch {
        message_type,
        response: CfgResponse::default(),
        event: None,
        summary: None,
    };

    match message_type {
        MessageType::Response => {
            out.summary = Some(parse_response(table, payload));
            out.response = CfgResponse {
                kind: ResponseKind::Cfg,
                seq_no: header.seq_no,
            };
        }
        MessageType::Info => {
            parse_info(table, payload);
            out.response = CfgResponse {
                kind: ResponseKind::Status,
                seq_no: header.seq_no,
            };
            debug!(seq_no = header.seq_no, "info message received");
            out.event = Some(AsyncEvent::GeneralAsyncInfo(frame));
        }
        MessageType::NetworkInfo => {
            out.event = Some(AsyncEvent::NetworkInfo(frame));
        }
        MessageType::ScanComplete => {
            debug!("scan notification received");
            out.event = Some(AsyncEvent::ScanComplete(frame));
        }
        MessageType::Unknown(tag) => {
            debug!(
                tag,
                seq_no = header.seq_no,
                head = ?&payload[..payload.len().min(8)],
                "received unknown message"
            );
            out.response.seq_no = header.seq_no;
        }
    }

    Ok(out)
}

/// [`dispatch`] a frame and deliver its event to `sink`.
pub fn dispatch_to<S: EventSink + ?Sized>(
    table: &mut ConfigTable,
    frame: &[u8],
    sink: &mut S,
) -> Result<CfgResponse> {
    let result = dispatch(table, frame)?;
    result.deliver(sink);
    Ok(result.response)
}
