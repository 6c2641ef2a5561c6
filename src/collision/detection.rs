use crate::math::vec2::Vec2;
use crate::shapes::{Axis, Circle, Polygon, Segment};
use super::contact::{feature_id, Contact};

/// Low-half marker for a contact point created by clipping rather than
/// taken from an incident vertex; the side plane index is or-ed in.
const CLIPPED: u32 = 0x8000;

/// Contact between two circles given by world centers and radii.
///
/// Reports only strictly overlapping circles. The normal points from `p1` to
/// `p2`; when the centers coincide it is the zero vector.
pub fn circle_to_circle(p1: Vec2, p2: Vec2, r1: f64, r2: f64) -> Option<Contact> {
    let min_dist = r1 + r2;
    let delta = p2 - p1;
    let dist_sq = delta.magnitude_squared();
    if dist_sq >= min_dist * min_dist {
        return None;
    }

    let dist = dist_sq.sqrt();
    let (normal, offset) = if dist == 0.0 {
        (Vec2::ZERO, 0.0)
    } else {
        (delta / dist, (r1 - 0.5 * min_dist) / dist)
    };

    Some(Contact::new(p1 + delta * (0.5 + offset), normal, dist - min_dist, 0))
}

pub fn circle_circle(a: &Circle, b: &Circle) -> Vec<Contact> {
    circle_to_circle(a.world_center(), b.world_center(), a.radius, b.radius)
        .into_iter()
        .collect()
}

/// Circle against a capsule. The normal points from the circle to the segment.
///
/// Touching (zero separation) along the face counts as a contact. Past the
/// endpoints the rounded caps are tested as circles.
pub fn circle_segment(circle: &Circle, segment: &Segment) -> Vec<Contact> {
    let center = circle.world_center();
    let a = segment.world_a();
    let b = segment.world_b();
    let n = segment.world_normal();
    let radius_sum = circle.radius + segment.radius;

    let dn = n.dot(center) - n.dot(a);
    let dist = dn.abs() - radius_sum;
    if dist > 0.0 {
        return Vec::new();
    }

    // Runs from a to b; zero when the segment is degenerate.
    let tangent = n.rperp();
    let dt = tangent.dot(center);
    let dt_min = tangent.dot(a);
    let dt_max = tangent.dot(b);

    if dt < dt_min {
        if dt < dt_min - radius_sum {
            return Vec::new();
        }
        circle_to_circle(center, a, circle.radius, segment.radius)
            .into_iter()
            .collect()
    } else if dt < dt_max {
        let normal = if dn < 0.0 { n } else { -n };
        let point = center + normal * (circle.radius + dist * 0.5);
        vec![Contact::new(point, normal, dist, 0)]
    } else if dt < dt_max + radius_sum {
        circle_to_circle(center, b, circle.radius, segment.radius)
            .into_iter()
            .collect()
    } else {
        Vec::new()
    }
}

/// Circle against a convex polygon. The normal points from the circle to
/// the polygon.
///
/// The face of least penetration picks the Voronoi region: inside the face's
/// span the face normal is used, otherwise the nearer vertex is tested as a
/// zero-radius circle.
pub fn circle_polygon(circle: &Circle, polygon: &Polygon) -> Vec<Contact> {
    let center = circle.world_center();
    let radius = circle.radius;

    let mut face = 0;
    let mut min = f64::NEG_INFINITY;
    for (i, axis) in polygon.world_axes().iter().enumerate() {
        let dist = axis.normal.dot(center) - axis.distance - radius;
        if dist > 0.0 {
            return Vec::new();
        }
        if dist > min {
            min = dist;
            face = i;
        }
    }

    let n = polygon.world_axes()[face].normal;
    let (a, b) = polygon.world_edge(face);
    let tangent = n.perpendicular();
    let dt = tangent.dot(center);

    let contact = if dt < tangent.dot(a) {
        circle_to_circle(center, a, radius, 0.0)
    } else if dt < tangent.dot(b) {
        let point = center - n * (radius + min * 0.5);
        Some(Contact::new(point, -n, min, 0))
    } else {
        circle_to_circle(center, b, radius, 0.0)
    };
    contact.into_iter().collect()
}

/// Capsule against a convex polygon. The normal points from the segment to
/// the polygon.
///
/// Candidate axes are the two faces of the capsule and every polygon face
/// measured against the swept endpoints. The least penetrating axis becomes
/// the reference face, with ties going to the segment. The other shape's
/// edge is clipped against it; if clipping leaves nothing, the rounded caps
/// are tested against the reference polygon face's vertices.
pub fn segment_polygon(segment: &Segment, polygon: &Polygon) -> Vec<Contact> {
    let ta = segment.world_a();
    let tb = segment.world_b();
    let tn = segment.world_normal();
    let r = segment.radius;

    // (face index, outward normal, separation) of the capsule side facing the polygon
    let segment_face = if tn == Vec2::ZERO {
        None
    } else {
        let front = polygon.value_on_axis(tn, tn.dot(ta) + r);
        let back = polygon.value_on_axis(-tn, -tn.dot(ta) + r);
        if front > 0.0 || back > 0.0 {
            return Vec::new();
        }
        Some(if front >= back { (0, tn, front) } else { (1, -tn, back) })
    };

    let mut poly_face = 0;
    let mut poly_sep = f64::NEG_INFINITY;
    for (i, axis) in polygon.world_axes().iter().enumerate() {
        let separation = axis.normal.dot(ta).min(axis.normal.dot(tb)) - r - axis.distance;
        if separation > 0.0 {
            return Vec::new();
        }
        if separation > poly_sep {
            poly_sep = separation;
            poly_face = i;
        }
    }

    let contacts = match segment_face {
        Some((face, normal, separation)) if separation >= poly_sep => {
            let incident = incident_edge(polygon, normal);
            let plane = Axis {
                normal,
                distance: normal.dot(ta) + r,
            };
            clip_to_face(incident, (ta, tb), plane, face, normal)
        }
        _ => {
            let axis = polygon.world_axes()[poly_face];
            let inset = axis.normal * r;
            let incident = [
                ClipVertex { point: ta - inset, id: 0 },
                ClipVertex { point: tb - inset, id: 1 },
            ];
            clip_to_face(incident, polygon.world_edge(poly_face), axis, poly_face, -axis.normal)
        }
    };
    if !contacts.is_empty() {
        return contacts;
    }

    let (pa, pb) = polygon.world_edge(poly_face);
    [(ta, pa), (tb, pa), (ta, pb), (tb, pb)]
        .into_iter()
        .find_map(|(s, p)| circle_to_circle(s, p, r, 0.0))
        .into_iter()
        .collect()
}

/// Two convex polygons by the separating axis test.
///
/// Returns no contacts as soon as one face of either polygon separates them.
/// Otherwise the face with the least negative separation is the reference
/// (ties prefer `a`), the most anti-parallel face of the other polygon is
/// clipped to it, and every clipped point behind the reference face is a
/// contact. Normals always point from `a` to `b`.
pub fn polygon_polygon(a: &Polygon, b: &Polygon) -> Vec<Contact> {
    let Some((face_a, sep_a)) = least_separated_face(a, b) else {
        return Vec::new();
    };
    let Some((face_b, sep_b)) = least_separated_face(b, a) else {
        return Vec::new();
    };

    if sep_a >= sep_b {
        clip_polygons(a, b, face_a)
    } else {
        clip_polygons(b, a, face_b)
            .into_iter()
            .map(Contact::flipped)
            .collect()
    }
}

/// Face of `reference` least penetrated by `other`, or `None` if one of its
/// faces is a separating axis.
fn least_separated_face(reference: &Polygon, other: &Polygon) -> Option<(usize, f64)> {
    let mut best = (0, f64::NEG_INFINITY);
    for (i, axis) in reference.world_axes().iter().enumerate() {
        let separation = other.value_on_axis(axis.normal, axis.distance);
        if separation > 0.0 {
            return None;
        }
        if separation > best.1 {
            best = (i, separation);
        }
    }
    Some(best)
}

fn clip_polygons(reference: &Polygon, incident: &Polygon, face: usize) -> Vec<Contact> {
    let axis = reference.world_axes()[face];
    clip_to_face(
        incident_edge(incident, axis.normal),
        reference.world_edge(face),
        axis,
        face,
        axis.normal,
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ClipVertex {
    point: Vec2,
    id: u32,
}

/// Edge of `polygon` facing most directly against `normal`, tagged with
/// vertex indices.
fn incident_edge(polygon: &Polygon, normal: Vec2) -> [ClipVertex; 2] {
    let index = polygon.most_anti_parallel_face(normal);
    let (p1, p2) = polygon.world_edge(index);
    [
        ClipVertex { point: p1, id: index as u32 },
        ClipVertex { point: p2, id: ((index + 1) % polygon.len()) as u32 },
    ]
}

/// Clips an incident edge to the side planes of the reference face running
/// `r1 -> r2`, then keeps the points on or behind `plane`.
fn clip_to_face(
    incident: [ClipVertex; 2],
    (r1, r2): (Vec2, Vec2),
    plane: Axis,
    reference: usize,
    contact_normal: Vec2,
) -> Vec<Contact> {
    let tangent = (r2 - r1).normalize();
    let Some(clipped) = clip(incident, -tangent, -tangent.dot(r1), 0) else {
        return Vec::new();
    };
    let Some(clipped) = clip(clipped, tangent, tangent.dot(r2), 1) else {
        return Vec::new();
    };

    clipped
        .iter()
        .filter_map(|v| {
            let separation = plane.normal.dot(v.point) - plane.distance;
            (separation <= 0.0).then(|| {
                Contact::new(v.point, contact_normal, separation, feature_id(reference, v.id))
            })
        })
        .collect()
}

/// Keeps the part of the edge with `normal . p <= offset`. `None` if the
/// whole edge lies outside.
fn clip(points: [ClipVertex; 2], normal: Vec2, offset: f64, side: u32) -> Option<[ClipVertex; 2]> {
    let [a, b] = points;
    let da = normal.dot(a.point) - offset;
    let db = normal.dot(b.point) - offset;
    let crossing = || ClipVertex {
        point: a.point + (b.point - a.point) * (da / (da - db)),
        id: CLIPPED | side,
    };

    match (da <= 0.0, db <= 0.0) {
        (true, true) => Some([a, b]),
        (true, false) => Some([a, crossing()]),
        (false, true) => Some([crossing(), b]),
        (false, false) => None,
    }
}
