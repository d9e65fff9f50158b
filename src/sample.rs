//! Reading point samples from text files: one point per line, coordinates
//! separated by whitespace, blank lines ignored.

use crate::core::{ClusteringError, ClusteringResult};
use ndarray::Array2;
use std::path::Path;

pub fn parse_sample(content: &str) -> ClusteringResult<Array2<f64>> {
    let mut data: Vec<f64> = Vec::new();
    let mut rows = 0;
    let mut dim = 0;

    for (line_idx, line) in content.lines().enumerate() {
        let line_no = line_idx + 1;
        let values = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|e| ClusteringError::SampleParse {
                    line: line_no,
                    message: format!("'{}': {}", token, e),
                })
            })
            .collect::<ClusteringResult<Vec<f64>>>()?;
        if values.is_empty() {
            continue;
        }

        if rows == 0 {
            dim = values.len();
        } else if values.len() != dim {
            return Err(ClusteringError::SampleParse {
                line: line_no,
                message: format!("expected {} coordinates, found {}", dim, values.len()),
            });
        }
        data.extend(values);
        rows += 1;
    }

    if rows == 0 {
        return Err(ClusteringError::EmptySample);
    }
    Array2::from_shape_vec((rows, dim), data)
        .map_err(|e| ClusteringError::SampleParse { line: 0, message: e.to_string() })
}

/// Reads a sample file into a `(points, dimension)` array.
pub fn read_sample<P: AsRef<Path>>(path: P) -> ClusteringResult<Array2<f64>> {
    let content = std::fs::read_to_string(path)?;
    parse_sample(&content)
}
