/// Find the knee of an ascending, convex distance curve.
///
/// Index and value are normalized to [0, 1]; the knee is the index where the
/// curve sags furthest below the diagonal. Returns `None` for curves with
/// fewer than two points, constant curves, and curves indistinguishable from
/// a straight line; callers treat that as a recoverable condition.
pub fn find_knee(curve: &[f64]) -> Option<usize> {
    if curve.len() < 2 {
        return None;
    }

    let first = curve[0];
    let last = curve[curve.len() - 1];
    let value_span = last - first;
    if !value_span.is_finite() || value_span <= 0.0 {
        return None;
    }

    let index_span = (curve.len() - 1) as f64;
    let mut best_index = 0;
    let mut best_sag = 0.0;
    for (index, &value) in curve.iter().enumerate() {
        let x = index as f64 / index_span;
        let y = (value - first) / value_span;
        let sag = x - y;
        if sag > best_sag {
            best_sag = sag;
            best_index = index;
        }
    }

    if best_sag <= 1e-9 {
        return None;
    }
    Some(best_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convex_curve_knees_before_the_rise() {
        // Flat shelf, then a sharp rise at the end.
        let curve = vec![0.0, 0.1, 0.2, 0.3, 0.4, 2.0];
        assert_eq!(find_knee(&curve), Some(4));
    }

    #[test]
    fn single_jump_knees_at_the_last_flat_point() {
        let curve = vec![0.1, 0.1, 0.1, 0.1, 0.1, 99.6];
        assert_eq!(find_knee(&curve), Some(4));
    }

    #[test]
    fn linear_curve_has_no_knee() {
        let curve: Vec<f64> = (0..10).map(|i| i as f64).collect();
        assert_eq!(find_knee(&curve), None);
    }

    #[test]
    fn constant_curve_has_no_knee() {
        assert_eq!(find_knee(&[1.0, 1.0, 1.0, 1.0]), None);
    }

    #[test]
    fn concave_curve_has_no_knee() {
        // Bulges above the diagonal; never sags below it.
        let curve = vec![0.0, 0.8, 0.95, 1.0];
        assert_eq!(find_knee(&curve), None);
    }

    #[test]
    fn short_and_empty_curves_have_no_knee() {
        assert_eq!(find_knee(&[]), None);
        assert_eq!(find_knee(&[0.5]), None);
    }
}
