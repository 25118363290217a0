//! Error types for geometry generation.
//!
//! Only parameter problems are errors. Degenerate samples (non-finite
//! projections, zero-length tangents) are skipped and counted on the mesh,
//! and an empty mesh is a normal result.

/// Errors that can occur while building a request or generating geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A caller-supplied parameter was outside its accepted range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A mesh violated one of its shape invariants.
    #[error("malformed mesh: {reason}")]
    MalformedMesh { reason: String },
}

impl GeometryError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        GeometryError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        GeometryError::MalformedMesh {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Rejects non-finite or non-positive values.
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> GeometryResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GeometryError::invalid(
            name,
            format!("must be a finite value > 0, got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = GeometryError::invalid("radius", "must be > 0");
        assert_eq!(err.to_string(), "invalid parameter `radius`: must be > 0");
    }

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("radius", 1.0).is_ok());
        assert!(ensure_positive("radius", 0.0).is_err());
        assert!(ensure_positive("radius", -2.0).is_err());
        assert!(ensure_positive("radius", f32::NAN).is_err());
        assert!(ensure_positive("radius", f32::INFINITY).is_err());
    }
}
