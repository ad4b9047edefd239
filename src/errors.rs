// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The things that can go wrong while exploring.  There aren't many:
//! the only input the engine refuses is a viewport that is empty or
//! upside down.

use failure::Fail;

/// Errors reported by the engine.
#[derive(Debug, Fail, PartialEq)]
pub enum Error {
    /// The real or imaginary range of a viewport is empty or inverted.
    #[fail(
        display = "Invalid bounds: real {}..{}, imaginary {}..{}",
        real_min, real_max, im_min, im_max
    )]
    InvalidBounds {
        /// Requested lower real bound.
        real_min: f64,
        /// Requested upper real bound.
        real_max: f64,
        /// Requested lower imaginary bound.
        im_min: f64,
        /// Requested upper imaginary bound.
        im_max: f64,
    },

    /// A caller-supplied buffer doesn't match the pixel grid.
    #[fail(
        display = "Buffer holds {} pixels but the plane needs {}",
        actual, expected
    )]
    BufferSize {
        /// width * height of the plane.
        expected: usize,
        /// Length of the buffer we were handed.
        actual: usize,
    },

    /// One of the row workers panicked, usually inside a color policy.
    #[fail(display = "A render worker panicked")]
    WorkerPanicked,
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_bounds_names_the_rectangle() {
        let e = Error::InvalidBounds {
            real_min: 1.0,
            real_max: -1.0,
            im_min: 0.0,
            im_max: 2.0,
        };
        assert_eq!(
            format!("{}", e),
            "Invalid bounds: real 1..-1, imaginary 0..2"
        );
    }

    #[test]
    fn buffer_size_reports_both_lengths() {
        let e = Error::BufferSize {
            expected: 8,
            actual: 7,
        };
        assert_eq!(format!("{}", e), "Buffer holds 7 pixels but the plane needs 8");
    }
}
