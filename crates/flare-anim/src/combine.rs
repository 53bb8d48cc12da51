//! Combination of independently keyed groups.
//!
//! [`combine`] derives a new group from two inputs by evaluating a pure
//! function at every time either input has a keyframe. Result keyframes use
//! linear timing: each one already holds the exact combined value at its
//! breakpoint, but curvature an input had *between* breakpoints is not
//! carried over.

use crate::interpolate::{Interpolate, value_at};
use crate::keyframe::{Keyframe, KeyframeGroup};

/// Combine `a` and `b` through `f` at the union of their keyframe times.
///
/// Returns an empty group if either input is empty.
pub fn combine<A, B, R, F>(a: &KeyframeGroup<A>, b: &KeyframeGroup<B>, f: F) -> KeyframeGroup<R>
where
    A: Interpolate,
    B: Interpolate,
    F: Fn(A, B) -> R,
{
    if a.is_empty() || b.is_empty() {
        return KeyframeGroup::empty();
    }

    let keyframes = breakpoints(a, b)
        .into_iter()
        .filter_map(|time| {
            let va = value_at(a, time)?;
            let vb = value_at(b, time)?;
            Some(Keyframe::new(time, f(va, vb)))
        })
        .collect();

    KeyframeGroup::from_ordered(keyframes)
}

/// Sorted union of both groups' keyframe times, without duplicates.
pub fn breakpoints<A, B>(a: &KeyframeGroup<A>, b: &KeyframeGroup<B>) -> Vec<f64> {
    let mut times = Vec::with_capacity(a.len() + b.len());
    let mut lhs = a.times().peekable();
    let mut rhs = b.times().peekable();

    loop {
        let next = match (lhs.peek().copied(), rhs.peek().copied()) {
            (Some(x), Some(y)) if x < y => lhs.next(),
            (Some(x), Some(y)) if y < x => rhs.next(),
            (Some(_), Some(_)) => {
                rhs.next();
                lhs.next()
            }
            (Some(_), None) => lhs.next(),
            (None, Some(_)) => rhs.next(),
            (None, None) => break,
        };
        if let Some(time) = next {
            times.push(time);
        }
    }

    times
}
