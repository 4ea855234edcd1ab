use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or running the gas simulation.
///
/// Stepping never fails: the collision variants are reported by the pair
/// resolver, then logged and counted by the detector.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value violates its documented range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Two particles share a center, so no collision normal exists.
    #[error("particles {first} and {second} have coincident centers")]
    CoincidentCenters { first: usize, second: usize },

    /// The pair has no finite, positive inverse-mass sum.
    #[error("particles {first} and {second} have degenerate masses")]
    DegenerateMass { first: usize, second: usize },

    /// A sweep case id that is not present in the sweep definition.
    #[error("unknown sweep case: {0}")]
    UnknownCase(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidConfig("region length must be > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid configuration"));
        assert!(msg.contains("region length"));

        let e = Error::CoincidentCenters { first: 3, second: 7 };
        assert!(e.to_string().contains('3'));
        assert!(e.to_string().contains('7'));
    }
}
