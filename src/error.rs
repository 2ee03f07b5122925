use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("unknown scale type `{0}`")]
    UnknownScaleType(String),

    #[error("invalid color specification `{spec}`: {reason}")]
    InvalidColorSpec { spec: String, reason: String },

    #[error("invalid option `{option}`: {reason}")]
    InvalidConfig { option: &'static str, reason: String },

    #[error("record {row} has no value for index field `{index_by}`")]
    MissingIdentity { index_by: String, row: usize },

    #[error("identity `{identity}` appears more than once in one frame")]
    DuplicateIdentity { identity: String },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("chart instance has been disposed")]
    Disposed,
}

impl GraphError {
    /// Returns `true` for errors that must halt chart construction.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownScaleType(_)
                | Self::InvalidColorSpec { .. }
                | Self::InvalidConfig { .. }
                | Self::MissingIdentity { .. }
                | Self::DuplicateIdentity { .. }
        )
    }

    pub(crate) fn config(option: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            option,
            reason: reason.into(),
        }
    }
}
