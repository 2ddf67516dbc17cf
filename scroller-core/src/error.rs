use alloc::string::String;
use thiserror::Error;

/// Errors raised while attaching or reconfiguring a scroller
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScrollerError {
    #[error("target has no scrollable surface or scroll height")]
    MissingScrollGeometry,

    #[error("scroll height must be finite and non-negative, got {0}")]
    InvalidScrollHeight(f64),

    #[error("speed must be finite and non-negative, got {0}")]
    InvalidSpeed(f64),

    #[error("{name} must be finite and positive, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("tick interval must be at least 1 ms")]
    InvalidInterval,

    #[error("scroll target `{0}` not found")]
    TargetNotFound(String),

    #[error("scroll target `{0}` is not an HTML element")]
    UnsupportedTarget(String),

    #[error("host environment error: {0}")]
    Host(String),
}

impl ScrollerError {
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host(message.into())
    }
}

pub type Result<T, E = ScrollerError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ScrollerError::InvalidScrollHeight(-3.0).to_string(),
            "scroll height must be finite and non-negative, got -3"
        );
        assert_eq!(
            ScrollerError::TargetNotFound("#feed".into()).to_string(),
            "scroll target `#feed` not found"
        );
        assert_eq!(
            ScrollerError::UnsupportedTarget("svg".into()).to_string(),
            "scroll target `svg` is not an HTML element"
        );
        assert_eq!(
            ScrollerError::host("setInterval failed").to_string(),
            "host environment error: setInterval failed"
        );
    }
}
