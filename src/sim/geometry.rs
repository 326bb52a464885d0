//! 2D geometry for bullets, mirrors and bricks
//!
//! Lines are kept in general form `a·x + b·y + c = 0` so vertical lines need
//! no special case. Angles are degrees throughout, matching how entities
//! store their headings.

use glam::Vec2;

use crate::error::SimError;
use crate::heading;

/// Determinants smaller than this are treated as parallel lines
const PARALLEL_EPSILON: f32 = 1e-6;

/// A line in general form `a·x + b·y + c = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl Line {
    pub fn new(a: f32, b: f32, c: f32) -> Self {
        Self { a, b, c }
    }

    /// Line through `point` with the given heading
    pub fn through(point: Vec2, angle_deg: f32) -> Self {
        let dir = heading(angle_deg);
        // Normal is the heading rotated by +90°
        Self {
            a: -dir.y,
            b: dir.x,
            c: dir.y * point.x - dir.x * point.y,
        }
    }

    /// Vertical line `x = x0`
    pub fn vertical(x0: f32) -> Self {
        Self { a: 1.0, b: 0.0, c: -x0 }
    }

    /// Signed value of the line equation at `p`
    #[inline]
    pub fn eval(&self, p: Vec2) -> f32 {
        self.a * p.x + self.b * p.y + self.c
    }
}

/// Which half-plane of a line a point lies in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// `a·x + b·y + c ≥ 0` (the boundary counts as positive)
    Positive,
    Negative,
}

impl Side {
    /// +1 / -1
    pub fn sign(self) -> i32 {
        match self {
            Side::Positive => 1,
            Side::Negative => -1,
        }
    }
}

/// Classify a point against a line
#[inline]
pub fn classify_point(p: Vec2, line: &Line) -> Side {
    if line.eval(p) >= 0.0 {
        Side::Positive
    } else {
        Side::Negative
    }
}

/// Intersection of two lines, or `DegenerateGeometry` when they are parallel
pub fn line_intersection(l1: &Line, l2: &Line) -> Result<Vec2, SimError> {
    let det = l1.a * l2.b - l2.a * l1.b;
    if det.abs() < PARALLEL_EPSILON {
        return Err(SimError::DegenerateGeometry);
    }
    let x = (l1.b * l2.c - l2.b * l1.c) / det;
    let y = (l2.a * l1.c - l1.a * l2.c) / det;
    Ok(Vec2::new(x, y))
}

/// Heading after bouncing off a mirror: `2·mirror − incoming`
#[inline]
pub fn reflect(mirror_angle_deg: f32, bullet_angle_deg: f32) -> f32 {
    2.0 * mirror_angle_deg - bullet_angle_deg
}

/// The four corners of a thin rotated rectangle.
///
/// `origin` is the rectangle's reference corner; the rectangle extends
/// `length` along the heading and `width` to its right-hand side. Order is
/// origin, tip, origin-side, tip-side.
pub fn rect_corners(origin: Vec2, length: f32, width: f32, angle_deg: f32) -> [Vec2; 4] {
    let dir = heading(angle_deg);
    let along = dir * length;
    let across = Vec2::new(dir.y, -dir.x) * width;
    [origin, origin + along, origin + across, origin + across + along]
}

/// True unless every corner lies in the same half-plane of `line`
pub fn straddles(corners: &[Vec2], line: &Line) -> bool {
    let mut sides = corners.iter().map(|&p| classify_point(p, line));
    match sides.next() {
        Some(first) => sides.any(|s| s != first),
        None => false,
    }
}

/// True when `v` lies in the closed interval `[lo, hi]`
#[inline]
pub fn within(v: f32, lo: f32, hi: f32) -> bool {
    v >= lo && v <= hi
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_boundary_is_positive() {
        let line = Line::vertical(1.0);
        assert_eq!(classify_point(Vec2::new(1.0, 5.0), &line), Side::Positive);
        assert_eq!(classify_point(Vec2::new(2.0, 0.0), &line), Side::Positive);
        assert_eq!(classify_point(Vec2::new(0.0, 0.0), &line), Side::Negative);
        assert_eq!(Side::Negative.sign(), -1);
    }

    #[test]
    fn test_intersection_of_axes() {
        let horizontal = Line::through(Vec2::new(0.0, 2.0), 0.0);
        let vertical = Line::vertical(-1.0);
        let p = line_intersection(&horizontal, &vertical).expect("lines cross");
        assert!((p - Vec2::new(-1.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_parallel_lines_are_degenerate() {
        let l1 = Line::through(Vec2::ZERO, 30.0);
        let l2 = Line::through(Vec2::new(0.0, 1.0), 30.0);
        assert!(matches!(
            line_intersection(&l1, &l2),
            Err(SimError::DegenerateGeometry)
        ));
        // Opposite headings describe parallel lines too
        let l3 = Line::through(Vec2::new(2.0, 0.0), 210.0);
        assert!(line_intersection(&l1, &l3).is_err());
    }

    #[test]
    fn test_through_vertical_heading() {
        let line = Line::through(Vec2::new(0.5, -3.0), 90.0);
        assert!(line.eval(Vec2::new(0.5, 10.0)).abs() < 1e-5);
        assert!(line.eval(Vec2::new(1.5, 0.0)).abs() > 0.5);
    }

    #[test]
    fn test_reflect_mirror_sixty() {
        assert_eq!(reflect(60.0, 0.0), 120.0);
        assert_eq!(reflect(120.0, 30.0), 210.0);
    }

    #[test]
    fn test_rect_corners_at_zero_heading() {
        let c = rect_corners(Vec2::new(1.0, 1.0), 0.4, 0.05, 0.0);
        assert!((c[0] - Vec2::new(1.0, 1.0)).length() < 1e-6);
        assert!((c[1] - Vec2::new(1.4, 1.0)).length() < 1e-6);
        assert!((c[2] - Vec2::new(1.0, 0.95)).length() < 1e-6);
        assert!((c[3] - Vec2::new(1.4, 0.95)).length() < 1e-6);
    }

    #[test]
    fn test_straddles() {
        let line = Line::vertical(0.0);
        let crossing = rect_corners(Vec2::new(-0.2, 0.0), 0.4, 0.05, 0.0);
        let clear = rect_corners(Vec2::new(0.5, 0.0), 0.4, 0.05, 0.0);
        assert!(straddles(&crossing, &line));
        assert!(!straddles(&clear, &line));
        assert!(!straddles(&[], &line));
    }

    proptest! {
        #[test]
        fn prop_reflect_is_an_involution(m in -180.0f32..180.0, theta in -360.0f32..360.0) {
            let out = reflect(m, theta);
            prop_assert!((out - (2.0 * m - theta)).abs() < 1e-3);
            prop_assert!((reflect(m, out) - theta).abs() < 1e-3);
        }

        #[test]
        fn prop_intersection_lies_on_both_lines(
            x1 in -4.0f32..4.0, y1 in -4.0f32..4.0, a1 in -89.0f32..89.0,
            x2 in -4.0f32..4.0, y2 in -4.0f32..4.0, delta in 10.0f32..170.0,
        ) {
            let l1 = Line::through(Vec2::new(x1, y1), a1);
            let l2 = Line::through(Vec2::new(x2, y2), a1 + delta);
            let p = line_intersection(&l1, &l2).expect("non-parallel");
            prop_assert!(l1.eval(p).abs() < 1e-2);
            prop_assert!(l2.eval(p).abs() < 1e-2);
        }

        #[test]
        fn prop_flipping_line_flips_strict_sides(x in -4.0f32..4.0, y in -4.0f32..4.0, ang in 0.0f32..180.0) {
            let line = Line::through(Vec2::new(0.3, -0.7), ang);
            let flipped = Line::new(-line.a, -line.b, -line.c);
            let p = Vec2::new(x, y);
            prop_assume!(line.eval(p).abs() > 1e-4);
            prop_assert_ne!(classify_point(p, &line), classify_point(p, &flipped));
        }
    }
}
