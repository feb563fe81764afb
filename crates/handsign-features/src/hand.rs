//! Per-hand landmark helpers.

use handsign_core::models::Point;

pub const WRIST: usize = 0;
pub const MIDDLE_MCP: usize = 9;

/// Palm sizes below this are treated as degenerate.
const MIN_SCALE: f32 = 1e-6;

/// Copy up to `n` points into a zero-padded slot of exactly `n` points.
pub fn pad_points(points: Option<&[Point]>, n: usize) -> Vec<Point> {
    let mut out = vec![Point::default(); n];
    if let Some(points) = points {
        for (slot, p) in out.iter_mut().zip(points.iter()) {
            *slot = *p;
        }
    }
    out
}

/// True when any point has a non-zero x or y.
pub fn is_present(hand: &[Point]) -> bool {
    hand.iter().any(|p| p.x != 0.0 || p.y != 0.0)
}

/// Translate by the wrist and scale by the wrist to middle-MCP distance,
/// zeroing z. Absent or degenerate hands are returned unchanged.
pub fn normalize(hand: &mut [Point]) {
    if !is_present(hand) || hand.len() <= MIDDLE_MCP {
        return;
    }
    let (wx, wy) = (hand[WRIST].x, hand[WRIST].y);
    let dx = hand[MIDDLE_MCP].x - wx;
    let dy = hand[MIDDLE_MCP].y - wy;
    let scale = (dx * dx + dy * dy).sqrt();
    if scale < MIN_SCALE {
        return;
    }
    for p in hand.iter_mut() {
        p.x = (p.x - wx) / scale;
        p.y = (p.y - wy) / scale;
        p.z = 0.0;
    }
}

/// Shift x/y so the first point sits at the origin.
pub fn anchor_to_first(points: &mut [Point]) {
    let Some(first) = points.first().copied() else {
        return;
    };
    for p in points.iter_mut() {
        p.x -= first.x;
        p.y -= first.y;
    }
}

/// Append x, y, z of every point to `row`.
pub fn flatten_into(points: &[Point], row: &mut Vec<f32>) {
    for p in points {
        row.extend_from_slice(&[p.x, p.y, p.z]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_at(origin: (f32, f32), mcp: (f32, f32)) -> Vec<Point> {
        let mut hand = vec![Point::new(origin.0, origin.1, 0.5); 21];
        hand[MIDDLE_MCP] = Point::new(mcp.0, mcp.1, 0.5);
        hand[20] = Point::new(origin.0 + 1.0, origin.1, 0.5);
        hand
    }

    #[test]
    fn normalize_moves_wrist_to_origin_and_scales_by_palm() {
        let mut hand = hand_at((100.0, 200.0), (100.0, 202.0));
        normalize(&mut hand);

        assert_eq!(hand[WRIST], Point::new(0.0, 0.0, 0.0));
        assert!((hand[MIDDLE_MCP].y - 1.0).abs() < 1e-6);
        assert!((hand[20].x - 0.5).abs() < 1e-6);
        assert!(hand.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn normalize_leaves_degenerate_hand_untouched() {
        let mut hand = vec![Point::new(3.0, 4.0, 0.2); 21];
        let before = hand.clone();
        normalize(&mut hand);
        assert_eq!(hand, before);
    }

    #[test]
    fn normalize_leaves_absent_hand_untouched() {
        let mut hand = vec![Point::default(); 21];
        normalize(&mut hand);
        assert!(!is_present(&hand));
    }

    #[test]
    fn pad_points_truncates_and_pads() {
        let long = vec![Point::new(1.0, 1.0, 1.0); 30];
        assert_eq!(pad_points(Some(&long), 21).len(), 21);

        let short = vec![Point::new(1.0, 1.0, 1.0); 3];
        let padded = pad_points(Some(&short), 21);
        assert_eq!(padded[2], Point::new(1.0, 1.0, 1.0));
        assert_eq!(padded[3], Point::default());

        assert!(!is_present(&pad_points(None, 21)));
    }

    #[test]
    fn anchor_keeps_z() {
        let mut face = vec![Point::new(5.0, 5.0, 0.3), Point::new(6.0, 7.0, 0.4)];
        anchor_to_first(&mut face);
        assert_eq!(face[0], Point::new(0.0, 0.0, 0.3));
        assert_eq!(face[1], Point::new(1.0, 2.0, 0.4));
    }
}
