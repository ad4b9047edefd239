// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane (the Viewport) that the
//! explorer is currently looking at.  Panning and zooming are
//! expressed as changes to the Viewport; the integral plane never
//! changes once the mapper is built.

use crate::errors::{Error, Result};
use log::debug;
use num::Complex;

/// The viewport a fresh plane starts with: the whole set, with a
/// little room on every side.
pub const DEFAULT_BOUNDS: (f64, f64, f64, f64) = (-2.2, 1.0, -1.2, 1.2);

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the x, y of a pixel in the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The rectangle of the complex plane mapped onto the pixel grid,
/// along with the distance between neighbouring samples.  The real
/// part is the x-component and the imaginary part the y-component.
///
/// A Viewport is only ever built through `Viewport::new`, so the
/// bounds are always increasing and the steps always agree with them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    real_min: f64,
    real_max: f64,
    im_min: f64,
    im_max: f64,
    real_step: f64,
    im_step: f64,
}

impl Viewport {
    /// Validates the bounds and derives the step sizes for a grid of
    /// the given size.
    pub fn new(
        plane: IntegralPlane,
        real_min: f64,
        real_max: f64,
        im_min: f64,
        im_max: f64,
    ) -> Result<Viewport> {
        // Written as negations so NaN bounds are refused as well.
        if !(real_min < real_max) || !(im_min < im_max) {
            return Err(Error::InvalidBounds {
                real_min,
                real_max,
                im_min,
                im_max,
            });
        }
        Ok(Viewport::with_steps(plane, (real_min, real_max, im_min, im_max)))
    }

    /// Derives the steps for bounds already known to be increasing.
    fn with_steps(plane: IntegralPlane, bounds: (f64, f64, f64, f64)) -> Viewport {
        let (real_min, real_max, im_min, im_max) = bounds;
        Viewport {
            real_min,
            real_max,
            im_min,
            im_max,
            real_step: (real_max - real_min) / (plane.0 as f64),
            im_step: (im_max - im_min) / (plane.1 as f64),
        }
    }

    /// The bounds as (real_min, real_max, im_min, im_max).
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.real_min, self.real_max, self.im_min, self.im_max)
    }

    /// Distance between horizontally and vertically adjacent samples.
    pub fn steps(&self) -> (f64, f64) {
        (self.real_step, self.im_step)
    }

    /// Width of the rectangle along the real axis.
    pub fn width(&self) -> f64 {
        self.real_max - self.real_min
    }

    /// Height of the rectangle along the imaginary axis.
    pub fn height(&self) -> f64 {
        self.im_max - self.im_min
    }

    /// The middle of the rectangle.
    pub fn center(&self) -> Complex<f64> {
        Complex::new(
            (self.real_min + self.real_max) / 2.0,
            (self.im_min + self.im_max) / 2.0,
        )
    }
}

/// Contains the definitions of two planes: an integral cartesian
/// plane and the viewport into the complex plane.  Maps pixels from
/// one to points in the other, and owns the pan/zoom state.
#[derive(Clone, Debug)]
pub struct PlaneMapper {
    /// The right-lower hand corner of the integral cartesian plane.
    /// The left-upper is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
    viewport: Viewport,
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the pixel grid and the four
    /// bounds of the complex rectangle to map onto it.
    pub fn new(
        width: usize,
        height: usize,
        real_min: f64,
        real_max: f64,
        im_min: f64,
        im_max: f64,
    ) -> Result<PlaneMapper> {
        let integral_plane = IntegralPlane(width, height);
        let viewport = Viewport::new(integral_plane, real_min, real_max, im_min, im_max)?;
        Ok(PlaneMapper {
            integral_plane,
            viewport,
        })
    }

    /// A plane of the given size looking at `DEFAULT_BOUNDS`.
    pub fn overview(width: usize, height: usize) -> PlaneMapper {
        let integral_plane = IntegralPlane(width, height);
        PlaneMapper {
            integral_plane,
            viewport: Viewport::with_steps(integral_plane, DEFAULT_BOUNDS),
        }
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// The viewport currently mapped onto the grid.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Replaces the viewport.  On failure the previous viewport is
    /// kept as it was.
    pub fn set_bounds(
        &mut self,
        real_min: f64,
        real_max: f64,
        im_min: f64,
        im_max: f64,
    ) -> Result<()> {
        self.viewport = Viewport::new(self.integral_plane, real_min, real_max, im_min, im_max)?;
        debug!("viewport now {:?}", self.viewport);
        Ok(())
    }

    /// Pan: translates the whole rectangle.
    pub fn shift(&mut self, d_re: f64, d_im: f64) -> Result<()> {
        let (real_min, real_max, im_min, im_max) = self.viewport.bounds();
        self.set_bounds(real_min + d_re, real_max + d_re, im_min + d_im, im_max + d_im)
    }

    /// Zoom: moves every side outward by factor / 2.  A positive
    /// factor zooms out, a negative one zooms in.
    pub fn zoom(&mut self, factor: f64) -> Result<()> {
        if factor == 0.0 {
            return Ok(());
        }
        let half = factor / 2.0;
        let (real_min, real_max, im_min, im_max) = self.viewport.bounds();
        self.set_bounds(real_min - half, real_max + half, im_min - half, im_max + half)
    }

    /// Given a pixel on the integral cartesian plane, return the
    /// sample of the complex plane it stands for.  Pixels outside the
    /// grid map to points outside the viewport; nothing checks for it.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.viewport.real_min + (pixel.0 as f64) * self.viewport.real_step,
            self.viewport.im_min + (pixel.1 as f64) * self.viewport.im_step,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> PlaneMapper {
        PlaneMapper::new(4, 2, -2.0, 2.0, -1.0, 1.0).unwrap()
    }

    #[test]
    fn planemapper_fails_on_bad_shape() {
        let pm = PlaneMapper::new(4, 4, 1.0, -1.0, -1.0, 1.0);
        assert!(pm.is_err());
        let pm = PlaneMapper::new(4, 4, -1.0, 1.0, 1.0, 1.0);
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 4, -1.0, 1.0, -1.0, 1.0);
        assert!(pm.is_ok());
    }

    #[test]
    fn overview_matches_a_validated_plane() {
        let (a, b, c, d) = DEFAULT_BOUNDS;
        let checked = PlaneMapper::new(32, 18, a, b, c, d).unwrap();
        let overview = PlaneMapper::overview(32, 18);
        assert_eq!(overview.integral_plane, IntegralPlane(32, 18));
        assert_eq!(*overview.viewport(), *checked.viewport());
    }

    #[test]
    fn nan_bounds_are_refused() {
        let mut pm = mapper();
        assert!(pm.set_bounds(std::f64::NAN, 1.0, -1.0, 1.0).is_err());
        assert_eq!(pm.viewport().bounds(), (-2.0, 2.0, -1.0, 1.0));
    }

    #[test]
    fn steps_follow_the_bounds() {
        let mut pm = mapper();
        assert_eq!(pm.viewport().steps(), (1.0, 1.0));
        pm.set_bounds(0.0, 2.0, 0.0, 1.0).unwrap();
        assert_eq!(pm.viewport().steps(), (0.5, 0.5));
    }

    #[test]
    fn failed_set_bounds_leaves_viewport_alone() {
        let mut pm = mapper();
        let before = *pm.viewport();
        let e = pm.set_bounds(3.0, 3.0, -1.0, 1.0).unwrap_err();
        assert_eq!(
            e,
            Error::InvalidBounds {
                real_min: 3.0,
                real_max: 3.0,
                im_min: -1.0,
                im_max: 1.0
            }
        );
        assert!(pm.set_bounds(-1.0, 1.0, 2.0, -2.0).is_err());
        assert_eq!(*pm.viewport(), before);
    }

    #[test]
    fn shift_there_and_back() {
        let mut pm = mapper();
        pm.shift(0.3, -0.7).unwrap();
        let (a, _, c, _) = pm.viewport().bounds();
        assert!((a + 1.7).abs() < 1e-12);
        assert!((c + 1.7).abs() < 1e-12);
        pm.shift(-0.3, 0.7).unwrap();
        let (a, b, c, d) = pm.viewport().bounds();
        for (got, want) in [a, b, c, d].iter().zip([-2.0, 2.0, -1.0, 1.0].iter()) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn zoom_zero_is_a_no_op() {
        let mut pm = mapper();
        let before = *pm.viewport();
        pm.zoom(0.0).unwrap();
        assert_eq!(*pm.viewport(), before);
    }

    #[test]
    fn positive_zoom_widens_the_view() {
        let mut pm = mapper();
        pm.zoom(1.0).unwrap();
        assert_eq!(pm.viewport().bounds(), (-2.5, 2.5, -1.5, 1.5));
        pm.zoom(-1.0).unwrap();
        assert_eq!(pm.viewport().bounds(), (-2.0, 2.0, -1.0, 1.0));
    }

    #[test]
    fn zooming_through_the_center_fails() {
        let mut pm = mapper();
        let before = *pm.viewport();
        assert!(pm.zoom(-2.0).is_err());
        assert_eq!(*pm.viewport(), before);
    }

    #[test]
    fn pixel_to_point_on_mixed_planes() {
        let pm = PlaneMapper::new(4, 4, -2.0, 2.0, -2.0, 2.0).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 1)), Complex::new(1.0, -1.0));
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let pm = PlaneMapper::new(5, 5, 0.0, 5.0, 0.0, 5.0).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(4.0, 4.0));
    }

    #[test]
    fn viewport_geometry() {
        let pm = PlaneMapper::new(10, 10, -2.2, 1.0, -1.2, 1.2).unwrap();
        let v = pm.viewport();
        assert!((v.width() - 3.2).abs() < 1e-12);
        assert!((v.height() - 2.4).abs() < 1e-12);
        assert!((v.center().re + 0.6).abs() < 1e-12);
        assert!(v.center().im.abs() < 1e-12);
        assert_eq!(pm.len(), 100);
        assert!(!pm.is_empty());
    }
}
