//! Layer metric extraction
//!
//! Reduces a layer's entity collection to a fixed metric vector (entity
//! count, closed-polygon area, perimeter, centroid). The extractor is a pure
//! function over a `LayerRecord`; both the validator (area display) and the
//! comparison engine consume its output.

use crate::catalogue::EntityCategory;
use crate::record::{EntityRecord, LayerRecord, Point};
use serde::Serialize;

/// Fixed per-layer metric vector
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricVector {
    pub entity_count: usize,
    pub total_area: f64,
    pub perimeter: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centroid: Option<Point>,
}

/// Polygon area via the shoelace formula (absolute value).
/// Fewer than 3 points yields 0.
pub fn shoelace_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    let n = points.len();
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area.abs() / 2.0
}

/// Closure test for a polygon-category entity: explicit closed flag, hatch
/// kind (hatches bound closed areas), or first point equal to last with at
/// least 3 points.
pub fn entity_is_closed(entity: &EntityRecord) -> bool {
    if entity.is_closed == Some(true) {
        return true;
    }
    if entity.kind == "HATCH" {
        return true;
    }
    let pts = &entity.points;
    pts.len() > 2 && pts.first() == pts.last()
}

/// Extract the metric vector for a layer.
///
/// Area sums shoelace areas of closed polygon-category entities plus any
/// precomputed hatch-style area. Perimeter is a best-effort sum of segment
/// lengths over entities exposing points (0 when none are derivable).
/// Centroid is the arithmetic mean of all collected vertex points, absent
/// when no entity exposes points.
pub fn extract_metrics(layer: &LayerRecord) -> MetricVector {
    let mut total_area = 0.0;
    let mut perimeter = 0.0;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut point_count = 0usize;

    for entity in &layer.entities {
        if let Some(hatch_area) = entity.area {
            total_area += hatch_area.abs();
        } else if EntityCategory::Polygon.allows_kind(&entity.kind) && entity_is_closed(entity) {
            total_area += shoelace_area(&entity.points);
        }

        let pts = &entity.points;
        if pts.len() >= 2 {
            for pair in pts.windows(2) {
                perimeter += pair[0].distance(&pair[1]);
            }
            // Closing segment for closed shapes whose last point is not a
            // repeat of the first
            if entity_is_closed(entity) && pts.first() != pts.last() {
                if let (Some(first), Some(last)) = (pts.first(), pts.last()) {
                    perimeter += last.distance(first);
                }
            }
        }

        for p in pts {
            sum_x += p.x;
            sum_y += p.y;
            point_count += 1;
        }
    }

    let centroid = if point_count > 0 {
        Some(Point::new(
            sum_x / point_count as f64,
            sum_y / point_count as f64,
        ))
    } else {
        None
    };

    MetricVector {
        entity_count: layer.entities.len(),
        total_area,
        perimeter,
        centroid,
    }
}
