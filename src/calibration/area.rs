//! calibration::area — miscalibration area via polygon decomposition.
//!
//! Purpose
//! -------
//! Compute the total geometric area enclosed between an empirical
//! calibration curve and the perfect-calibration diagonal y = x. The closed
//! boundary is the curve traced forward, the diagonal traced backward (the
//! nominal axis used for both coordinates), and a final edge returning to
//! the start. Because the curve may cross the diagonal several times, this
//! boundary is in general self-intersecting, and a single signed-area
//! (shoelace) pass over it would cancel lobes lying on opposite sides of a
//! crossing. The area is therefore computed by resolving the boundary into
//! simple sub-polygons first and summing their absolute areas.
//!
//! Key behaviors
//! -------------
//! - Split the curve/diagonal region at every point where the curve meets
//!   the diagonal: transversal mid-segment crossings are located by exact
//!   segment–segment intersection, and on-diagonal vertices close the
//!   running sub-polygon directly.
//! - Close each sub-polygon along the diagonal (its first and last vertices
//!   always lie on y = x, so the implicit closing edge *is* the diagonal
//!   chord) and evaluate it with the shoelace formula.
//! - Sum the absolute sub-polygon areas into a single non-negative score.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs must pass `validation::validate_curve_for_area`: equal length
//!   ≥ 2, finite entries, and a non-decreasing nominal axis. With a
//!   monotone nominal axis the curve chain cannot intersect itself, so the
//!   only self-intersections of the boundary are curve/diagonal crossings —
//!   exactly the points the decomposition splits at.
//! - The backward traversal of the boundary deliberately uses the nominal
//!   axis for both coordinates. It represents the diagonal, not a reversed
//!   copy of the curve; "fixing" it to a literal curve reversal would
//!   change the metric's meaning.
//!
//! Conventions
//! -----------
//! - A curve endpoint off the diagonal contributes a vertical closing edge
//!   (from `(x, x)` up to `(x, y)`), matching the closed boundary described
//!   above.
//! - Sub-polygons with fewer than three vertices (degenerate loops produced
//!   by runs along the diagonal) have zero area by construction.
//!
//! Downstream usage
//! ----------------
//! - [`miscalibration_area`] is the public entry point; `CalibrationCurve`
//!   delegates to the unchecked kernel after validating at construction.
//! - A perfectly calibrated curve yields an area of exactly 0; identical or
//!   collinear inputs are numerically degenerate, not errors.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the area of known fixtures (triangle above the
//!   diagonal, symmetric bow-tie crossing, mid-segment transversal
//!   crossing), verify the zero-area behavior of perfect calibration, and
//!   check that crossing curves do not cancel (the failure mode of a naive
//!   shoelace over the whole boundary).

use crate::calibration::errors::CalResult;
use crate::calibration::validation::validate_curve_for_area;

/// Compute the miscalibration area between a calibration curve and the
/// perfect-calibration diagonal.
///
/// Parameters
/// ----------
/// - `predicted`: `&[f64]`
///   Nominal confidence levels (the x axis). Must be non-decreasing,
///   finite, and of length ≥ 2.
/// - `observed`: `&[f64]`
///   Observed coverage fractions paired with `predicted` by index. Must be
///   finite and of equal length.
///
/// Returns
/// -------
/// `CalResult<f64>`
///   - `Ok(area)` with `area ≥ 0`: the total area of all simple
///     sub-polygons enclosed between the curve and the diagonal.
///   - `Err(CalibrationError)` when validation fails.
///
/// Errors
/// ------
/// - `CalibrationError::CurveLengthMismatch`, `CurveTooShort`,
///   `NonFiniteValue`, `NonMonotonicAxis`, `EmptyInput`
///   Returned by `validate_curve_for_area` for malformed inputs.
///
/// Panics
/// ------
/// - Never panics under normal operation.
///
/// Notes
/// -----
/// - Identical `predicted`/`observed` sequences (perfect calibration) and
///   other collinear degeneracies produce an area of exactly 0.
/// - Cost is O(N) in the curve length plus O(k) in the number of
///   diagonal crossings.
///
/// Examples
/// --------
/// ```rust
/// use uq_calibration::calibration::miscalibration_area;
///
/// // Curve bowed above the diagonal: the enclosed triangle
/// // (0,0)-(0.5,1)-(1,1) has area 0.25.
/// let predicted = vec![0.0, 0.5, 1.0];
/// let observed = vec![0.0, 1.0, 1.0];
/// let area = miscalibration_area(&predicted, &observed).unwrap();
/// assert!((area - 0.25).abs() < 1e-12);
/// ```
pub fn miscalibration_area(predicted: &[f64], observed: &[f64]) -> CalResult<f64> {
    validate_curve_for_area(predicted, observed)?;
    Ok(area_between_curve_and_diagonal(predicted, observed))
}

/// Area kernel assuming validated inputs (equal length ≥ 2, finite values,
/// non-decreasing nominal axis). Used by `CalibrationCurve`, whose
/// constructor establishes those invariants once.
pub(crate) fn area_between_curve_and_diagonal(predicted: &[f64], observed: &[f64]) -> f64 {
    decompose_into_simple_loops(predicted, observed)
        .iter()
        .map(|polygon| shoelace_area(polygon).abs())
        .sum()
}

/// Resolve the closed curve/diagonal boundary into simple sub-polygons.
///
/// Walks the curve forward and cuts the running vertex list every time the
/// curve meets the diagonal: either at a vertex lying exactly on y = x, or
/// at the interpolated intersection point of a segment whose endpoints sit
/// on opposite sides. Each returned loop starts and ends on the diagonal
/// (or at a vertical closing edge for off-diagonal curve endpoints), so the
/// implicit edge closing the loop back to its first vertex runs along the
/// diagonal and the loop is simple.
fn decompose_into_simple_loops(predicted: &[f64], observed: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let n = predicted.len();
    let mut loops: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    // Anchor the first loop on the diagonal. If the curve starts off the
    // diagonal, the boundary's closing edge is the vertical segment from
    // (x₀, x₀) up to (x₀, y₀).
    current.push((predicted[0], predicted[0]));
    if observed[0] != predicted[0] {
        current.push((predicted[0], observed[0]));
    }

    for i in 0..n - 1 {
        let below = observed[i] - predicted[i];
        let ahead = observed[i + 1] - predicted[i + 1];

        if below != 0.0 && ahead != 0.0 && (below > 0.0) != (ahead > 0.0) {
            // Transversal crossing strictly inside the segment: the curve
            // and the diagonal segment intersect at parameter t along the
            // nominal axis.
            let t = below / (below - ahead);
            let crossing = predicted[i] + t * (predicted[i + 1] - predicted[i]);
            current.push((crossing, crossing));
            loops.push(std::mem::take(&mut current));
            current.push((crossing, crossing));
        }

        current.push((predicted[i + 1], observed[i + 1]));

        if ahead == 0.0 {
            // A vertex on the diagonal closes the running loop exactly.
            loops.push(std::mem::take(&mut current));
            current.push((predicted[i + 1], observed[i + 1]));
        }
    }

    // Mirror the anchoring step at the far end: an off-diagonal final
    // vertex is closed by the vertical edge down to (x_last, x_last).
    let last = n - 1;
    if observed[last] != predicted[last] {
        current.push((predicted[last], predicted[last]));
    }
    loops.push(current);

    loops
}

/// Signed shoelace area of a polygon given as an implicitly closed vertex
/// list. Degenerate polygons (fewer than three vertices) have zero area.
#[inline]
fn shoelace_area(polygon: &[(f64, f64)]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }

    let mut twice_area = 0.0;
    for i in 0..polygon.len() {
        let (x0, y0) = polygon[i];
        let (x1, y1) = polygon[(i + 1) % polygon.len()];
        twice_area += x0 * y1 - x1 * y0;
    }

    0.5 * twice_area
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Zero area for a perfectly calibrated curve.
    // - Pinned areas for analytically known fixtures: a triangle above the
    //   diagonal, a symmetric two-lobe crossing, and a mid-segment
    //   transversal crossing.
    // - Non-cancellation across crossings (the property a naive shoelace
    //   over the self-intersecting boundary would violate).
    // - Degenerate collinear inputs.
    //
    // They intentionally DO NOT cover:
    // - Validation error branches, which are tested in
    //   `calibration::validation`.
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-12;

    #[test]
    // Purpose
    // -------
    // Verify that a curve identical to the diagonal encloses no area.
    //
    // Given
    // -----
    // - predicted == observed on a five-point grid.
    //
    // Expect
    // ------
    // - The miscalibration area is exactly 0.
    fn miscalibration_area_perfect_calibration_is_zero() {
        // Arrange
        let grid = vec![0.0, 0.25, 0.5, 0.75, 1.0];

        // Act
        let area = miscalibration_area(&grid, &grid).expect("valid inputs");

        // Assert
        assert_eq!(area, 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Pin the area of a curve bowed above the diagonal that meets it again
    // at the far corner.
    //
    // Given
    // -----
    // - predicted = [0, 0.5, 1], observed = [0, 1, 1].
    // - The enclosed region is the triangle (0,0)-(0.5,1)-(1,1), whose
    //   shoelace area is 0.25.
    //
    // Expect
    // ------
    // - The computed area equals 0.25 within floating-point tolerance.
    fn miscalibration_area_bowed_curve_matches_triangle_area() {
        // Arrange
        let predicted = vec![0.0, 0.5, 1.0];
        let observed = vec![0.0, 1.0, 1.0];

        // Act
        let area = miscalibration_area(&predicted, &observed).expect("valid inputs");

        // Assert
        assert!((area - 0.25).abs() < TOL, "expected 0.25, got {area}");
    }

    #[test]
    // Purpose
    // -------
    // Pin the area of a curve that touches the diagonal at the midpoint,
    // forming one lobe above and one lobe below.
    //
    // Given
    // -----
    // - predicted = [0, 0.5, 1], observed = [0.25, 0.5, 0.75].
    // - Each lobe is a triangle of area 0.0625 (vertical edge 0.25, base
    //   0.5), so the total is 0.125.
    //
    // Expect
    // ------
    // - The computed area equals 0.125 within floating-point tolerance,
    //   i.e. the lobes add instead of cancelling.
    fn miscalibration_area_opposite_lobes_add_instead_of_cancelling() {
        // Arrange
        let predicted = vec![0.0, 0.5, 1.0];
        let observed = vec![0.25, 0.5, 0.75];

        // Act
        let area = miscalibration_area(&predicted, &observed).expect("valid inputs");

        // Assert
        assert!((area - 0.125).abs() < TOL, "expected 0.125, got {area}");
    }

    #[test]
    // Purpose
    // -------
    // Pin the area of a curve that crosses the diagonal in the interior of
    // a segment rather than at a vertex.
    //
    // Given
    // -----
    // - predicted = [0, 1], observed = [1, 0]: the curve y = 1 − x crosses
    //   the diagonal at (0.5, 0.5).
    // - The region decomposes into two triangles of area 0.25 each.
    //
    // Expect
    // ------
    // - The computed area equals 0.5 within floating-point tolerance.
    fn miscalibration_area_mid_segment_crossing_is_split_at_intersection() {
        // Arrange
        let predicted = vec![0.0, 1.0];
        let observed = vec![1.0, 0.0];

        // Act
        let area = miscalibration_area(&predicted, &observed).expect("valid inputs");

        // Assert
        assert!((area - 0.5).abs() < TOL, "expected 0.5, got {area}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that a curve with equal mass above and below the diagonal
    // still reports a strictly positive area (no signed cancellation).
    //
    // Given
    // -----
    // - A four-point curve forming symmetric lobes above then below the
    //   diagonal.
    //
    // Expect
    // ------
    // - The area is strictly positive and equals twice the single-lobe
    //   area.
    fn miscalibration_area_symmetric_curve_reports_total_unsigned_area() {
        // Arrange
        let predicted = vec![0.0, 0.25, 0.5, 0.75, 1.0];
        let observed = vec![0.0, 0.45, 0.5, 0.55, 1.0];
        let single_lobe = {
            let predicted_half = vec![0.0, 0.25, 0.5];
            let observed_half = vec![0.0, 0.45, 0.5];
            miscalibration_area(&predicted_half, &observed_half).expect("valid inputs")
        };

        // Act
        let area = miscalibration_area(&predicted, &observed).expect("valid inputs");

        // Assert
        assert!(area > 0.0, "symmetric lobes must not cancel");
        assert!(
            (area - 2.0 * single_lobe).abs() < TOL,
            "expected {}, got {area}",
            2.0 * single_lobe
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify the degenerate case of a constant offset curve: a single
    // trapezoidal lobe whose area matches the analytic value.
    //
    // Given
    // -----
    // - predicted = [0, 1], observed = [0.2, 1.2]: the curve runs parallel
    //   to the diagonal at offset 0.2, closed by vertical edges at both
    //   ends, forming a parallelogram of area 0.2.
    //
    // Expect
    // ------
    // - The computed area equals 0.2 within floating-point tolerance.
    fn miscalibration_area_parallel_offset_curve_forms_parallelogram() {
        // Arrange
        let predicted = vec![0.0, 1.0];
        let observed = vec![0.2, 1.2];

        // Act
        let area = miscalibration_area(&predicted, &observed).expect("valid inputs");

        // Assert
        assert!((area - 0.2).abs() < TOL, "expected 0.2, got {area}");
    }

    #[test]
    // Purpose
    // -------
    // Verify the shoelace helper on an explicit unit square.
    //
    // Given
    // -----
    // - The counter-clockwise unit square.
    //
    // Expect
    // ------
    // - Signed area +1.0; reversing the orientation flips the sign.
    fn shoelace_area_unit_square_is_one() {
        // Arrange
        let ccw = vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let cw: Vec<(f64, f64)> = ccw.iter().rev().copied().collect();

        // Act / Assert
        assert!((shoelace_area(&ccw) - 1.0).abs() < TOL);
        assert!((shoelace_area(&cw) + 1.0).abs() < TOL);
    }
}
