//! Decorative hexagons near three of the card's corners.
//!
//! The bottom-right corner stays clear because the closing and signature
//! lines end there. Bottom-left anchors depend on the final card height,
//! so ornaments are only ever placed from a finished [`LayoutPlan`].

use crate::plan::LayoutPlan;
use crate::scale::{ScaleProfile, mul_ratio};
use cardfit_types::Point;

pub const ORNAMENTS_PER_CORNER: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
}

impl Corner {
    pub const DECORATED: [Corner; 3] = [Corner::TopLeft, Corner::TopRight, Corner::BottomLeft];
}

/// Distance between neighbouring ornament centers: `floor(ornament_size * 1.4)`.
pub fn ornament_spacing(profile: &ScaleProfile) -> u32 {
    mul_ratio(profile.ornament_size, 14, 10)
}

/// Center of ornament `index` (0-based, left to right) in `corner`.
///
/// The middle ornament of each corner is nudged half a spacing toward the
/// card's interior. Returns `None` for an index past [`ORNAMENTS_PER_CORNER`].
pub fn corner_anchor(plan: &LayoutPlan, corner: Corner, index: usize) -> Option<Point> {
    if index >= ORNAMENTS_PER_CORNER {
        return None;
    }
    let profile = plan.profile();
    let inset = 0.7 * profile.padding as f32;
    let spacing = ornament_spacing(profile) as f32;
    let width = plan.width() as f32;
    let height = plan.height() as f32;

    let nudge = if index == ORNAMENTS_PER_CORNER / 2 {
        spacing * 0.5
    } else {
        0.0
    };
    let x = match corner {
        Corner::TopLeft | Corner::BottomLeft => inset + index as f32 * spacing,
        Corner::TopRight => {
            width - inset - (ORNAMENTS_PER_CORNER - 1 - index) as f32 * spacing
        }
    };
    let y = match corner {
        Corner::TopLeft | Corner::TopRight => inset + nudge,
        Corner::BottomLeft => height - inset - nudge,
    };
    Some(Point::new(x, y))
}

/// Vertices of a hexagon with vertex `i` at `i * 60°` from `center`.
pub fn hexagon(center: Point, radius: f32) -> Vec<Point> {
    (0..6)
        .map(|i| {
            let angle = (i as f32 * 60.0).to_radians();
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

/// Every ornament center on the card.
pub fn ornament_centers(plan: &LayoutPlan) -> Vec<Point> {
    Corner::DECORATED
        .iter()
        .flat_map(|corner| {
            (0..ORNAMENTS_PER_CORNER).filter_map(move |i| corner_anchor(plan, *corner, i))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_content;

    fn reference_plan() -> LayoutPlan {
        LayoutPlan::new(ScaleProfile::derive(1748).unwrap(), &sample_content(5, 3)).unwrap()
    }

    #[test]
    fn anchors_sit_at_the_inset_corners() {
        let plan = reference_plan();
        // inset = 56, spacing = 42
        let anchor = |corner, index| corner_anchor(&plan, corner, index);
        assert_eq!(anchor(Corner::TopLeft, 0), Some(Point::new(56.0, 56.0)));
        assert_eq!(anchor(Corner::TopLeft, 1), Some(Point::new(98.0, 77.0)));
        assert_eq!(anchor(Corner::TopRight, 0), Some(Point::new(1748.0 - 56.0 - 84.0, 56.0)));
        assert_eq!(anchor(Corner::TopRight, 2), Some(Point::new(1748.0 - 56.0, 56.0)));
        let h = plan.height() as f32;
        assert_eq!(anchor(Corner::BottomLeft, 1), Some(Point::new(98.0, h - 56.0 - 21.0)));
        assert_eq!(anchor(Corner::BottomLeft, 3), None);
    }

    #[test]
    fn nine_ornaments_none_bottom_right() {
        let plan = reference_plan();
        let centers = ornament_centers(&plan);
        assert_eq!(centers.len(), 9);
        let (w, h) = (plan.width() as f32, plan.height() as f32);
        assert!(!centers.iter().any(|c| c.x > w / 2.0 && c.y > h / 2.0));
    }

    #[test]
    fn hexagon_vertices_sit_on_the_radius() {
        let center = Point::new(100.0, 50.0);
        let points = hexagon(center, 30.0);
        assert_eq!(points.len(), 6);
        assert!((points[0].x - 130.0).abs() < 1e-4 && (points[0].y - 50.0).abs() < 1e-4);
        for p in points {
            let r = ((p.x - center.x).powi(2) + (p.y - center.y).powi(2)).sqrt();
            assert!((r - 30.0).abs() < 1e-3);
        }
    }
}
