//! Line-segment input format

use serde::{Deserialize, Serialize};

use crate::error::FrameResult;

/// Input units per analysis unit (geometry arrives in millimetres, the model
/// works in metres)
pub const MM_PER_M: f64 = 1000.0;

/// A raw line segment from the uploaded geometry, in source units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSegment {
    /// Start point coordinates
    pub start: [f64; 3],
    /// End point coordinates
    pub end: [f64; 3],
}

impl LineSegment {
    /// Create a new segment between two raw points
    pub fn new(start: [f64; 3], end: [f64; 3]) -> Self {
        Self { start, end }
    }
}

/// The uploaded geometry document: a JSON object with a `"beams"` array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryFile {
    /// Line segments, one per structural member
    pub beams: Vec<LineSegment>,
}

impl GeometryFile {
    /// Parse a geometry document from a JSON string
    pub fn from_json(raw: &str) -> FrameResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parse a geometry document from a reader
    pub fn from_reader<R: std::io::Read>(reader: R) -> FrameResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_beams_array() {
        let raw = r#"{"beams": [
            {"start": [0.0, 0.0, 0.0], "end": [0.0, 0.0, 3000.0]},
            {"start": [0.0, 0.0, 3000.0], "end": [3000.0, 0.0, 3000.0]}
        ]}"#;

        let file = GeometryFile::from_json(raw).unwrap();
        assert_eq!(file.beams.len(), 2);
        assert_eq!(file.beams[0].end, [0.0, 0.0, 3000.0]);
    }

    #[test]
    fn test_missing_beams_key_is_an_error() {
        assert!(GeometryFile::from_json(r#"{"lines": []}"#).is_err());
    }
}
