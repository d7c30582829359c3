/// Errors that can occur while dispatching an inbound frame.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] widcfg_frame::FrameError),
}

pub type Result<T> = std::result::Result<T, DispatchError>;
