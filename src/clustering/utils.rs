use ndarray::{Array1, ArrayView2, Axis};

/// Mean of the selected rows of `data`, accumulated in `indices` order.
///
/// Always derived from the raw rows so repeated merges never accumulate drift.
pub fn compute_mean(data: &ArrayView2<f64>, indices: &[usize]) -> Array1<f64> {
    if indices.is_empty() {
        return Array1::<f64>::zeros(data.ncols());
    }
    let selected_data = data.select(Axis(0), indices);
    selected_data
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::<f64>::zeros(data.ncols()))
}
