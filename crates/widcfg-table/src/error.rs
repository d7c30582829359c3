use widcfg_frame::Wid;

/// Errors that can occur while building a configuration table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Allocation failed while building the table.
    #[error("out of memory while allocating configuration table: {0}")]
    ResourceExhausted(#[from] std::collections::TryReserveError),

    /// The seed lists the same id twice.
    #[error("duplicate seed entry for {0}")]
    DuplicateWid(Wid),

    /// The seed lists the reserved NIL id.
    #[error("seed entry uses the reserved NIL id")]
    NilWid,

    /// The seed lists an id with an unassigned kind tag.
    #[error("seed entry {0} has no known value kind")]
    UnknownKind(Wid),

    /// A string or binary seed entry has no capacity.
    #[error("seed entry {0} needs a capacity")]
    MissingCapacity(Wid),

    /// A fixed-width seed entry declares a capacity.
    #[error("seed entry {0} is fixed-width and takes no capacity")]
    UnexpectedCapacity(Wid),

    /// A capacity cannot be carried by a single frame.
    #[error("capacity for {wid} too large ({capacity} bytes, max {max})")]
    CapacityTooLarge {
        wid: Wid,
        capacity: usize,
        max: usize,
    },

    /// The seed configuration could not be loaded.
    #[error("failed to load table config: {0}")]
    LoadFailed(String),

    /// The seed configuration is not valid JSON.
    #[error("table config is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TableError>;
