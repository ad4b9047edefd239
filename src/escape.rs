// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time test.  A point on the complex plane is iterated
//! through z -> z² + c, starting from the point itself, and we count
//! how many steps it takes the orbit to leave the circle of radius
//! two.  Orbits that never leave within the budget are treated as
//! members of the set.

use num::Complex;

/// The squared escape radius.  Comparing against |z|² saves a square
/// root per iteration.
pub const ESCAPE_RADIUS_SQR: f64 = 4.0;

/// What happened to the orbit of a point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EscapeResult {
    /// The orbit left the escape radius on this iteration.
    Escaped(u32),
    /// The orbit was still inside after this many iterations.
    BoundedWithin(u32),
}

impl EscapeResult {
    /// The iteration count handed to a color policy: the escape
    /// iteration, or the whole budget for points that never escaped.
    #[inline]
    pub fn iterations(self) -> u32 {
        match self {
            EscapeResult::Escaped(i) => i,
            EscapeResult::BoundedWithin(max) => max,
        }
    }

    /// True if the orbit left the circle.
    pub fn escaped(self) -> bool {
        match self {
            EscapeResult::Escaped(_) => true,
            EscapeResult::BoundedWithin(_) => false,
        }
    }
}

/// This is our classic iterator function.  The escape check happens
/// before each update, so a point already outside the circle escapes
/// on iteration 0.  A budget of zero reports BoundedWithin(0).
#[inline]
pub fn iterate(c: Complex<f64>, max_iterations: u32) -> EscapeResult {
    let (mut zr, mut zi) = (c.re, c.im);
    for i in 0..max_iterations {
        let zr_sqr = zr * zr;
        let zi_sqr = zi * zi;
        if zr_sqr + zi_sqr > ESCAPE_RADIUS_SQR {
            return EscapeResult::Escaped(i);
        }
        zi = 2.0 * zr * zi + c.im;
        zr = zr_sqr - zi_sqr + c.re;
    }
    EscapeResult::BoundedWithin(max_iterations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        assert_eq!(
            iterate(Complex::new(0.0, 0.0), 1000),
            EscapeResult::BoundedWithin(1000)
        );
    }

    #[test]
    fn far_points_escape_immediately() {
        assert_eq!(iterate(Complex::new(3.0, 0.0), 10), EscapeResult::Escaped(0));
        assert_eq!(iterate(Complex::new(-2.0, -1.0), 10), EscapeResult::Escaped(0));
    }

    #[test]
    fn the_radius_itself_is_inside() {
        // |-2|² == 4, which is not strictly greater; -2 is a fixed point
        // of the orbit (4 - 2 = 2, then 2 stays 2).
        assert_eq!(
            iterate(Complex::new(-2.0, 0.0), 50),
            EscapeResult::BoundedWithin(50)
        );
    }

    #[test]
    fn one_escapes_on_the_third_check() {
        // 1 -> 2 -> 5: |2|² == 4 stays, |5|² escapes.
        assert_eq!(iterate(Complex::new(1.0, 0.0), 10), EscapeResult::Escaped(2));
    }

    #[test]
    fn zero_budget_is_bounded() {
        assert_eq!(
            iterate(Complex::new(100.0, 100.0), 0),
            EscapeResult::BoundedWithin(0)
        );
    }

    #[test]
    fn iterations_and_escaped() {
        assert_eq!(EscapeResult::Escaped(3).iterations(), 3);
        assert!(EscapeResult::Escaped(3).escaped());
        assert_eq!(EscapeResult::BoundedWithin(9).iterations(), 9);
        assert!(!EscapeResult::BoundedWithin(9).escaped());
    }

    #[test]
    fn agrees_with_complex_arithmetic() {
        let c = Complex::new(-0.75, 0.1);
        let mut z = c;
        let mut expected = EscapeResult::BoundedWithin(200);
        for i in 0..200 {
            if z.norm_sqr() > 4.0 {
                expected = EscapeResult::Escaped(i);
                break;
            }
            z = z * z + c;
        }
        assert_eq!(iterate(c, 200), expected);
    }
}
