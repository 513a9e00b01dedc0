//! Outer boundary tracing for binary masks.

use crate::mask::geometry::Mask;

/// 8-neighbourhood, clockwise in image coordinates (y down), starting west.
const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

fn direction_of(dx: i64, dy: i64) -> usize {
    NEIGHBOURS
        .iter()
        .position(|&(nx, ny)| nx == dx && ny == dy)
        .unwrap_or(0)
}

fn occupied(mask: &Mask, x: i64, y: i64) -> bool {
    x >= 0
        && y >= 0
        && x < i64::from(mask.width())
        && y < i64::from(mask.height())
        && mask.get(x as u32, y as u32)
}

/// Outer boundary of the first connected component (8-connectivity) in raster order.
///
/// Moore-neighbour tracing, clockwise, starting at the component's top-left pixel. Runs of
/// pixels along a straight line are reduced to their end points. Empty masks yield an empty
/// polygon; a lone pixel yields a single point.
pub fn outer_boundary(mask: &Mask) -> Vec<(u32, u32)> {
    let Some(start) = first_occupied(mask) else {
        return Vec::new();
    };
    simplify_straight_runs(trace(mask, start))
}

fn first_occupied(mask: &Mask) -> Option<(i64, i64)> {
    let w = mask.width() as usize;
    if w == 0 {
        return None;
    }
    mask.data()
        .iter()
        .position(|v| *v != 0)
        .map(|i| ((i % w) as i64, (i / w) as i64))
}

fn trace(mask: &Mask, start: (i64, i64)) -> Vec<(u32, u32)> {
    let to_u32 = |(x, y): (i64, i64)| (x as u32, y as u32);
    let mut out = vec![to_u32(start)];

    // Raster order guarantees the west neighbour of `start` is background.
    let mut current = start;
    let mut backtrack = 0usize;
    let mut first_step: Option<(i64, i64)> = None;
    let limit = 4 * (mask.width() as usize) * (mask.height() as usize) + 8;

    for _ in 0..limit {
        let mut next = None;
        for k in 1..=8 {
            let dir = (backtrack + k) % 8;
            let (dx, dy) = NEIGHBOURS[dir];
            let p = (current.0 + dx, current.1 + dy);
            if occupied(mask, p.0, p.1) {
                let (px, py) = NEIGHBOURS[(dir + 7) % 8];
                let prev = (current.0 + px, current.1 + py);
                next = Some((p, direction_of(prev.0 - p.0, prev.1 - p.1)));
                break;
            }
        }
        let Some((p, back)) = next else {
            break;
        };

        if current == start {
            match first_step {
                None => first_step = Some(p),
                Some(first) if first == p => break,
                Some(_) => {}
            }
        }
        out.push(to_u32(p));
        current = p;
        backtrack = back;
    }

    if out.len() > 1 && out.last() == out.first() {
        out.pop();
    }
    out
}

fn simplify_straight_runs(points: Vec<(u32, u32)>) -> Vec<(u32, u32)> {
    let n = points.len();
    if n < 3 {
        return points;
    }
    let step = |a: (u32, u32), b: (u32, u32)| {
        (
            i64::from(b.0) - i64::from(a.0),
            i64::from(b.1) - i64::from(a.1),
        )
    };
    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/mask/contour.rs"]
mod tests;
