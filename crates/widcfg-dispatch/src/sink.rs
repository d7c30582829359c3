/// Receivers for asynchronous notifications carried by inbound frames.
///
/// Each method gets the whole inbound frame, header included, and owns any
/// further decoding. Defaults ignore the event.
pub trait EventSink {
    /// General asynchronous info ('I' frames).
    fn on_general_async_info(&mut self, _frame: &[u8]) {}

    /// Network info ('N' frames).
    fn on_network_info(&mut self, _frame: &[u8]) {}

    /// Scan complete notification ('S' frames).
    fn on_scan_complete(&mut self, _frame: &[u8]) {}
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn on_general_async_info(&mut self, frame: &[u8]) {
        (**self).on_general_async_info(frame);
    }

    fn on_network_info(&mut self, frame: &[u8]) {
        (**self).on_network_info(frame);
    }

    fn on_scan_complete(&mut self, frame: &[u8]) {
        (**self).on_scan_complete(frame);
    }
}
