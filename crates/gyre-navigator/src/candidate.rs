//! Candidate surfaces and their deterministic ordering.

use gyre_core::{SurfaceId, SurfaceRole};

/// One intersectable surface ahead of the track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// The surface handle.
    pub surface: SurfaceId,
    /// Distance along the travel direction, refreshed for the active
    /// candidate on every loop iteration.
    pub distance: f64,
    /// Navigation role, used for tie-breaking.
    pub role: SurfaceRole,
    /// Whether this is the caller-requested target surface.
    pub is_target: bool,
}

/// Order candidates by increasing distance; exact ties fall back to the
/// fixed role precedence (boundaries before layers) and finally to the
/// surface id, so the order never depends on container iteration order.
pub fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then(a.role.cmp(&b.role))
            .then(a.surface.cmp(&b.surface))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(surface: u32, distance: f64, role: SurfaceRole) -> Candidate {
        Candidate {
            surface: SurfaceId(surface),
            distance,
            role,
            is_target: false,
        }
    }

    #[test]
    fn sorted_by_distance() {
        let mut c = vec![
            candidate(0, 30.0, SurfaceRole::Layer),
            candidate(1, 10.0, SurfaceRole::Layer),
            candidate(2, 20.0, SurfaceRole::Boundary),
        ];
        sort_candidates(&mut c);
        let order: Vec<u32> = c.iter().map(|c| c.surface.0).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn boundary_wins_exact_distance_tie() {
        let mut c = vec![
            candidate(5, 25.0, SurfaceRole::Layer),
            candidate(9, 25.0, SurfaceRole::Boundary),
        ];
        sort_candidates(&mut c);
        assert_eq!(c[0].surface, SurfaceId(9));
    }

    #[test]
    fn id_breaks_full_ties_independent_of_input_order() {
        let mut a = vec![
            candidate(7, 25.0, SurfaceRole::Layer),
            candidate(3, 25.0, SurfaceRole::Layer),
        ];
        let mut b = a.clone();
        b.reverse();
        sort_candidates(&mut a);
        sort_candidates(&mut b);
        assert_eq!(a, b);
        assert_eq!(a[0].surface, SurfaceId(3));
    }
}
