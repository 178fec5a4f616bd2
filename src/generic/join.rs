//! Chaining generic curves into contiguous poly-curves

use super::curve::{Curve, PolyCurve};
use super::primitives::Point;

/// Join `curves` end to end into as few chains as possible
///
/// Pieces are reversed where that makes them connect. A closed curve, or a
/// curve whose end points cannot be evaluated, forms a chain on its own.
pub fn join(curves: &[Curve], tolerance: f64) -> Vec<PolyCurve> {
    let mut remaining: Vec<Curve> = curves.to_vec();
    let mut chains = Vec::new();
    while !remaining.is_empty() {
        let first = remaining.remove(0);
        let mut chain = vec![first];
        loop {
            let (Some(head), Some(tail)) = (chain_start(&chain), chain_end(&chain)) else {
                break;
            };
            if head.distance(&tail) <= tolerance {
                break;
            }
            let Some((i, reverse, prepend)) = find_neighbour(&remaining, head, tail, tolerance) else {
                break;
            };
            let next = remaining.remove(i);
            let next = if reverse { next.reversed() } else { next };
            if prepend {
                chain.insert(0, next);
            } else {
                chain.push(next);
            }
        }
        chains.push(PolyCurve::new(chain));
    }
    chains
}

fn chain_start(chain: &[Curve]) -> Option<Point> {
    chain.first().and_then(Curve::start_point)
}

fn chain_end(chain: &[Curve]) -> Option<Point> {
    chain.last().and_then(Curve::end_point)
}

/// Index of a curve touching the chain, whether to reverse it, and whether
/// it goes in front
fn find_neighbour(remaining: &[Curve], head: Point, tail: Point, tolerance: f64) -> Option<(usize, bool, bool)> {
    remaining.iter().enumerate().find_map(|(i, c)| {
        if c.is_closed(tolerance) {
            return None;
        }
        let (s, e) = (c.start_point()?, c.end_point()?);
        if s.distance(&tail) <= tolerance {
            Some((i, false, false))
        } else if e.distance(&tail) <= tolerance {
            Some((i, true, false))
        } else if e.distance(&head) <= tolerance {
            Some((i, false, true))
        } else if s.distance(&head) <= tolerance {
            Some((i, true, true))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generic::curve::Line;

    fn line(a: (f64, f64), b: (f64, f64)) -> Curve {
        Curve::Line(Line::new(Point::new(a.0, a.1, 0.0), Point::new(b.0, b.1, 0.0)))
    }

    #[test]
    fn test_join_out_of_order_square() {
        let pieces = [
            line((1.0, 1.0), (0.0, 1.0)),
            line((0.0, 0.0), (1.0, 0.0)),
            line((0.0, 0.0), (0.0, 1.0)),
            line((1.0, 0.0), (1.0, 1.0)),
        ];
        let chains = join(&pieces, 1e-9);
        assert_eq!(chains.len(), 1);
        let closed = Curve::Poly(chains[0].clone());
        assert!(closed.is_closed(1e-9));
        assert_eq!(chains[0].curves.len(), 4);
    }

    #[test]
    fn test_join_gap_gives_two_chains() {
        let pieces = [line((0.0, 0.0), (1.0, 0.0)), line((1.5, 0.0), (2.0, 0.0))];
        assert_eq!(join(&pieces, 1e-3).len(), 2);
    }
}
