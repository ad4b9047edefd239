// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Mandelbrot struct is the explorer engine itself: a fixed pixel
//! grid, a viewport that can be panned and zoomed, an iteration
//! depth, and a color policy.  Every call to `fill_frame` computes a
//! brand new buffer from those parameters alone, so a presentation
//! layer can redraw as often as it likes and navigate between
//! redraws.
//!
//! Mutation takes `&mut self` and rendering takes `&self`, so the
//! viewport can't change underneath a frame that is being filled.

use log::debug;
use std::time::Instant;

use crate::color::{ColorPolicy, Grayscale};
use crate::errors::Result;
use crate::planes::{PlaneMapper, Viewport};
use crate::render;

pub use crate::planes::DEFAULT_BOUNDS;

/// The iteration depth a fresh engine starts with.
pub const DEFAULT_ITERATION_DEPTH: u32 = 50;

/// An explorer engine.  Dimensions and iteration depth are trusted:
/// both must be positive.
pub struct Mandelbrot {
    plane: PlaneMapper,
    iteration_depth: u32,
    policy: Box<dyn ColorPolicy>,
    threads: usize,
}

impl Mandelbrot {
    /// Requires the width and height of the image.  The viewport,
    /// depth and policy start out at their defaults, and the engine
    /// uses one worker per logical CPU.
    pub fn new(width: usize, height: usize) -> Self {
        Mandelbrot {
            plane: PlaneMapper::overview(width, height),
            iteration_depth: DEFAULT_ITERATION_DEPTH,
            policy: Box::new(Grayscale),
            threads: num_cpus::get(),
        }
    }

    /// Width and height of the pixel grid.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.plane.integral_plane.0, self.plane.integral_plane.1)
    }

    /// The viewport currently mapped onto the grid.
    pub fn viewport(&self) -> &Viewport {
        self.plane.viewport()
    }

    /// The pixel-to-point mapping in use.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// Replaces the viewport.  Fails with InvalidBounds, leaving the
    /// old viewport in place, if either range is empty or inverted.
    pub fn set_bounds(
        &mut self,
        real_min: f64,
        real_max: f64,
        im_min: f64,
        im_max: f64,
    ) -> Result<()> {
        self.plane.set_bounds(real_min, real_max, im_min, im_max)
    }

    /// Pans the viewport.
    pub fn shift(&mut self, d_re: f64, d_im: f64) -> Result<()> {
        self.plane.shift(d_re, d_im)
    }

    /// Positive factors zoom out, negative factors zoom in.
    pub fn zoom(&mut self, factor: f64) -> Result<()> {
        self.plane.zoom(factor)
    }

    /// The per-pixel iteration budget.
    pub fn iteration_depth(&self) -> u32 {
        self.iteration_depth
    }

    /// Sets the per-pixel iteration budget.
    pub fn set_iteration_depth(&mut self, depth: u32) {
        debug!("iteration depth {} -> {}", self.iteration_depth, depth);
        self.iteration_depth = depth;
    }

    /// Replaces the color policy.
    pub fn set_color_policy<P>(&mut self, policy: P)
    where
        P: ColorPolicy + 'static,
    {
        self.policy = Box::new(policy);
    }

    /// Number of row workers used by `fill_frame`.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Sets the number of row workers.  Zero is treated as one.
    pub fn set_threads(&mut self, threads: usize) {
        self.threads = threads.max(1);
    }

    /// Renders a frame on all workers.
    pub fn fill_frame(&self) -> Result<Vec<u32>> {
        let start = Instant::now();
        let frame = render::fill_frame(
            &self.plane,
            self.iteration_depth,
            &*self.policy,
            self.threads,
        )?;
        debug!(
            "filled {}x{} frame on {} threads in {:?}",
            self.plane.integral_plane.0,
            self.plane.integral_plane.1,
            self.threads,
            start.elapsed()
        );
        Ok(frame)
    }

    /// Renders a frame into a buffer the caller keeps between frames.
    pub fn fill_into(&self, buffer: &mut [u32]) -> Result<()> {
        render::fill_into(
            &self.plane,
            self.iteration_depth,
            &*self.policy,
            self.threads,
            buffer,
        )
    }

    /// Renders a frame on the calling thread only.
    pub fn fill_frame_single(&self) -> Vec<u32> {
        let start = Instant::now();
        let frame = render::fill_frame_single(&self.plane, self.iteration_depth, &*self.policy);
        debug!("filled single-threaded frame in {:?}", start.elapsed());
        frame
    }
}
