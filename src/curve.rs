//! Hermite curve interpolation for histogram display curves.
//!
//! Builds a smooth path through an ordered sequence of 2D sample points by
//! emitting one cubic Bezier segment per consecutive point pair, with control
//! points derived from Catmull-Rom style tangents. The sequence is treated as
//! open: the first and last tangents use only their single adjacent segment.

use crate::histogram::BINS;

/// Default tangent tension.
pub const TENSION: f32 = 1.0 / 3.0;

/// A 2D sample point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// One cubic Bezier segment: two control points and an end point. The start
/// point is the previous segment's end (or the path start).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

/// A smooth path through a point sequence.
///
/// Empty input yields an empty path; a single point yields a start with no
/// segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HermitePath {
    pub start: Option<Point>,
    pub segments: Vec<CubicSegment>,
}

/// Interpolate `points` with the default tension.
pub fn hermite_path(points: &[Point]) -> HermitePath {
    hermite_path_with_tension(points, TENSION)
}

/// Interpolate `points`, scaling each tangent by `tension`.
pub fn hermite_path_with_tension(points: &[Point], tension: f32) -> HermitePath {
    let Some(&first) = points.first() else {
        return HermitePath::default();
    };

    let mut segments = Vec::with_capacity(points.len().saturating_sub(1));
    for i in 0..points.len() - 1 {
        let current = points[i];
        let next = points[i + 1];

        // Tangent at the segment start: average of the neighboring segments
        // for interior points, the lone outgoing segment at the path start.
        let (mx, my) = if i > 0 {
            let previous = points[i - 1];
            ((next.x - previous.x) / 2.0, (next.y - previous.y) / 2.0)
        } else {
            ((next.x - current.x) / 2.0, (next.y - current.y) / 2.0)
        };
        let control1 = Point::new(current.x + mx * tension, current.y + my * tension);

        // Tangent at the segment end, using only the incoming segment when
        // `next` is the last point.
        let (mx, my) = if i < points.len() - 2 {
            let after_next = points[i + 2];
            ((after_next.x - current.x) / 2.0, (after_next.y - current.y) / 2.0)
        } else {
            ((next.x - current.x) / 2.0, (next.y - current.y) / 2.0)
        };
        let control2 = Point::new(next.x - mx * tension, next.y - my * tension);

        segments.push(CubicSegment {
            control1,
            control2,
            end: next,
        });
    }

    HermitePath {
        start: Some(first),
        segments,
    }
}

/// Normalized sample points for one histogram channel.
///
/// Bin index maps to `x` in [0, 1) and counts map to `y` in [0, 1] against
/// `max`, the tallest bin across the channels being displayed. This is the
/// sequence the histogram display feeds to [`hermite_path`].
pub fn channel_curve_points(counts: &[u32; BINS], max: u32) -> Vec<Point> {
    if max == 0 {
        return Vec::new();
    }
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| Point::new(i as f32 / BINS as f32, count as f32 / max as f32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_path() {
        let path = hermite_path(&[]);
        assert_eq!(path.start, None);
        assert!(path.segments.is_empty());
    }

    #[test]
    fn test_single_point_yields_no_segments() {
        let path = hermite_path(&[Point::new(3.0, 4.0)]);
        assert_eq!(path.start, Some(Point::new(3.0, 4.0)));
        assert!(path.segments.is_empty());
    }

    #[test]
    fn test_three_points_yield_two_segments() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 10.0),
        ];
        let path = hermite_path(&points);

        assert_eq!(path.start, Some(points[0]));
        assert_eq!(path.segments.len(), 2);
        assert_eq!(path.segments[0].end, points[1]);
        assert_eq!(path.segments[1].end, points[2]);
    }

    #[test]
    fn test_control_points_follow_open_tangents() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 10.0),
        ];
        let path = hermite_path(&points);

        // First tangent uses only the first segment: m = (10, 0) / 2.
        let c1 = path.segments[0].control1;
        assert!((c1.x - 5.0 / 3.0).abs() < 1e-5);
        assert!(c1.y.abs() < 1e-5);

        // Last tangent uses only the final segment: m = (10, 10) / 2.
        let c2 = path.segments[1].control2;
        assert!((c2.x - (20.0 - 5.0 / 3.0)).abs() < 1e-5);
        assert!((c2.y - (10.0 - 5.0 / 3.0)).abs() < 1e-5);
    }

    #[test]
    fn test_collinear_points_stay_collinear() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
        ];
        let path = hermite_path(&points);

        for segment in &path.segments {
            assert!((segment.control1.x - segment.control1.y).abs() < 1e-5);
            assert!((segment.control2.x - segment.control2.y).abs() < 1e-5);
        }
    }

    #[test]
    fn test_channel_curve_points_are_normalized() {
        let mut counts = [0u32; BINS];
        counts[0] = 5;
        counts[128] = 10;

        let points = channel_curve_points(&counts, 10);
        assert_eq!(points.len(), BINS);
        assert!((points[0].y - 0.5).abs() < 1e-6);
        assert!((points[128].y - 1.0).abs() < 1e-6);
        assert!((points[128].x - 0.5).abs() < 1e-6);
        assert_eq!(points[200].y, 0.0);
    }

    #[test]
    fn test_zero_max_yields_no_points() {
        let counts = [0u32; BINS];
        assert!(channel_curve_points(&counts, 0).is_empty());
    }
}
