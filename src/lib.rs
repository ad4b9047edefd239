#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot explorer engine
//!
//! The Mandelbrot set is the set of points c on the complex plane for
//! which the orbit of z -> z² + c never runs off to infinity.  We
//! can't iterate forever, so each point gets a budget (the iteration
//! depth): if the orbit leaves the circle of radius two within the
//! budget the point is outside, and the iteration it left on says
//! how far outside.  A color policy turns that number into a pixel.
//!
//! The engine owns a viewport, the rectangle of the complex plane
//! being looked at, and maps a fixed pixel grid onto it.  Panning and
//! zooming change the viewport; every frame is then recomputed from
//! scratch, one row per unit of work, spread over as many threads as
//! the machine has.  The engine knows nothing about windows or
//! displays.  It hands back a row-major buffer of 0xAARRGGBB pixels
//! and leaves the rest to whoever is drawing.

extern crate crossbeam;
extern crate failure;
extern crate itertools;
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod color;
pub mod errors;
pub mod escape;
pub mod explorer;
pub mod planes;
pub mod render;

pub use color::{AlphaFade, ColorPolicy, Grayscale, Identity};
pub use errors::Error;
pub use escape::{iterate, EscapeResult};
pub use explorer::Mandelbrot;
pub use planes::{Pixel, PlaneMapper, Viewport};
