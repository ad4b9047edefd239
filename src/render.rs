// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fills a pixel buffer with the colored escape times of every pixel
//! of a plane.  There are two paths.  The single-threaded one walks
//! the grid row by row and exists mostly so the threaded one has
//! something to be checked against.  The threaded one hands out
//! rows: the buffer is cut into `width`-sized slices, each slice is
//! a unit of work, and a fixed number of scoped workers pull units
//! off a shared queue until it is empty.  Since every slice belongs
//! to exactly one worker, writes need no locking; the only lock is
//! around the queue itself.

use itertools::iproduct;
use std::iter::Enumerate;
use std::slice::ChunksMut;
use std::sync::{Arc, Mutex};

use crate::color::ColorPolicy;
use crate::errors::{Error, Result};
use crate::escape::iterate;
use crate::planes::{Pixel, PlaneMapper};

type RowQueue<'a> = Arc<Mutex<Enumerate<ChunksMut<'a, u32>>>>;

fn check_buffer(plane: &PlaneMapper, buffer: &[u32]) -> Result<()> {
    if buffer.len() != plane.len() {
        return Err(Error::BufferSize {
            expected: plane.len(),
            actual: buffer.len(),
        });
    }
    Ok(())
}

/// Colors a single pixel.
#[inline]
fn shade<P>(plane: &PlaneMapper, depth: u32, policy: &P, pixel: &Pixel) -> u32
where
    P: ColorPolicy + ?Sized,
{
    let point = plane.pixel_to_point(pixel);
    policy.color(depth, iterate(point, depth).iterations())
}

/// Renders row `y` of the plane, left to right, into `row`.
pub fn render_row<P>(plane: &PlaneMapper, depth: u32, policy: &P, y: usize, row: &mut [u32])
where
    P: ColorPolicy + ?Sized,
{
    for (x, slot) in row.iter_mut().enumerate() {
        *slot = shade(plane, depth, policy, &Pixel(x, y));
    }
}

/// Visits every pixel in row-major order.  The buffer length has
/// already been checked.
fn walk<P>(plane: &PlaneMapper, depth: u32, policy: &P, buffer: &mut [u32])
where
    P: ColorPolicy + ?Sized,
{
    let width = plane.integral_plane.0;
    for (y, x) in iproduct!(0..plane.integral_plane.1, 0..width) {
        buffer[y * width + x] = shade(plane, depth, policy, &Pixel(x, y));
    }
}

/// The single-threaded render, into a buffer the caller owns.
pub fn fill_single_into<P>(
    plane: &PlaneMapper,
    depth: u32,
    policy: &P,
    buffer: &mut [u32],
) -> Result<()>
where
    P: ColorPolicy + ?Sized,
{
    check_buffer(plane, buffer)?;
    walk(plane, depth, policy, buffer);
    Ok(())
}

/// The main function for single-threaded renders.
pub fn fill_frame_single<P>(plane: &PlaneMapper, depth: u32, policy: &P) -> Vec<u32>
where
    P: ColorPolicy + ?Sized,
{
    let mut buffer = vec![0 as u32; plane.len()];
    walk(plane, depth, policy, &mut buffer);
    buffer
}

/// The threaded render, into a buffer the caller owns.  Blocks until
/// every row is done.  `threads` of zero is treated as one.
pub fn fill_into<P>(
    plane: &PlaneMapper,
    depth: u32,
    policy: &P,
    threads: usize,
    buffer: &mut [u32],
) -> Result<()>
where
    P: ColorPolicy + ?Sized,
{
    check_buffer(plane, buffer)?;
    if plane.is_empty() {
        return Ok(());
    }

    let threads = threads.max(1);
    let rows: RowQueue = Arc::new(Mutex::new(
        buffer.chunks_mut(plane.integral_plane.0).enumerate(),
    ));
    crossbeam::scope(|spawner| {
        for _ in 0..threads {
            let rows = rows.clone();
            spawner.spawn(move |_| loop {
                // A poisoned queue means another worker already
                // panicked; the scope reports it, we just stop.
                let row = match rows.lock() {
                    Ok(mut rows) => rows.next(),
                    Err(_) => None,
                };
                match row {
                    Some((y, row)) => render_row(plane, depth, policy, y, row),
                    None => {
                        break;
                    }
                }
            });
        }
    })
    .map_err(|_| Error::WorkerPanicked)
}

/// A multi-threaded version of the render function that takes a
/// thread count.  The result is identical to `fill_frame_single`.
pub fn fill_frame<P>(
    plane: &PlaneMapper,
    depth: u32,
    policy: &P,
    threads: usize,
) -> Result<Vec<u32>>
where
    P: ColorPolicy + ?Sized,
{
    let mut buffer = vec![0 as u32; plane.len()];
    fill_into(plane, depth, policy, threads, &mut buffer)?;
    Ok(buffer)
}
