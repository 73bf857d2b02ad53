use thiserror::Error;

/// Why a hotspot polygon was rejected. Rejected hotspots are skipped; the rest
/// of the panorama still loads.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HotspotError {
    #[error("hotspot {id} has {count} boundary points, at least 3 are required")]
    TooFewPoints { id: String, count: usize },
    #[error("hotspot {id} has a non-finite boundary point at index {index}")]
    NonFinite { id: String, index: usize },
    #[error("hotspot {id} is degenerate (collinear or zero-area boundary)")]
    Degenerate { id: String },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("indicator {id} has a zero or non-finite position")]
    NoDirection { id: String },
}

/// Failure to produce the next panorama. Reported by the host; the viewer shows
/// the message and stays usable for another load.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadError {
    #[error("failed to fetch panorama {id}: {reason}")]
    Fetch { id: String, reason: String },
    #[error("malformed panorama descriptor: {0}")]
    Parse(String),
    #[error("failed to load panorama image {uri}: {reason}")]
    Image { uri: String, reason: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown indicator action type `{0}`")]
pub struct ActionTypeError(pub String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewerError {
    #[error("no viewer mounted in container `{0}`")]
    UnknownViewer(String),
    #[error("a viewer is already mounted in container `{0}`")]
    AlreadyMounted(String),
}
