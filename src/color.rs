// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Color policies turn an (iteration depth, escape iteration) pair
//! into a packed 0xAARRGGBB pixel.  A policy is called from every
//! render worker at once, so it must be Send + Sync and must not
//! need `&mut self`.  Any plain `Fn(u32, u32) -> u32` closure that
//! captures nothing mutable already qualifies.

/// Maps the result of the escape-time test to a packed ARGB color.
pub trait ColorPolicy: Send + Sync {
    /// `escape` is the iteration the orbit escaped on, or `depth`
    /// itself if it never did.
    fn color(&self, depth: u32, escape: u32) -> u32;
}

impl<F> ColorPolicy for F
where
    F: Fn(u32, u32) -> u32 + Send + Sync,
{
    #[inline]
    fn color(&self, depth: u32, escape: u32) -> u32 {
        self(depth, escape)
    }
}

/// Packs four channels into 0xAARRGGBB.
#[inline]
pub fn pack_argb(a: u32, r: u32, g: u32, b: u32) -> u32 {
    ((a << 24) & 0xFF00_0000)
        | ((r << 16) & 0x00FF_0000)
        | ((g << 8) & 0x0000_FF00)
        | (b & 0x0000_00FF)
}

/// floor(255 / depth * escape).  Escape never exceeds depth, so this
/// stays within 0..=255.
#[inline]
fn intensity(depth: u32, escape: u32) -> u32 {
    (255.0 / f64::from(depth) * f64::from(escape)) as u32
}

/// The default policy: opaque gray, brighter the longer the orbit
/// survived.  Points in the set come out white.
#[derive(Copy, Clone, Debug, Default)]
pub struct Grayscale;

impl ColorPolicy for Grayscale {
    #[inline]
    fn color(&self, depth: u32, escape: u32) -> u32 {
        let c = intensity(depth, escape);
        pack_argb(0xFF, c, c, c)
    }
}

/// Gray like `Grayscale`, but the alpha channel fades out as the
/// gray brightens, so the set itself is fully transparent.
#[derive(Copy, Clone, Debug, Default)]
pub struct AlphaFade;

impl ColorPolicy for AlphaFade {
    #[inline]
    fn color(&self, depth: u32, escape: u32) -> u32 {
        let c = intensity(depth, escape);
        pack_argb(255u32.wrapping_sub(c), c, c, c)
    }
}

/// Hands back the raw escape iteration.  Not a color at all, but
/// useful when the caller wants to do its own shading later.
#[derive(Copy, Clone, Debug, Default)]
pub struct Identity;

impl ColorPolicy for Identity {
    #[inline]
    fn color(&self, _depth: u32, escape: u32) -> u32 {
        escape
    }
}

/// Unpacks an ARGB buffer into the RGBA byte order image encoders
/// expect.
pub fn argb_to_rgba(pixels: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(pixels.len() * 4);
    for &p in pixels {
        bytes.push((p >> 16) as u8);
        bytes.push((p >> 8) as u8);
        bytes.push(p as u8);
        bytes.push((p >> 24) as u8);
    }
    bytes
}

/// Unpacks an ARGB buffer into RGB bytes, dropping the alpha.
pub fn argb_to_rgb(pixels: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(pixels.len() * 3);
    for &p in pixels {
        bytes.push((p >> 16) as u8);
        bytes.push((p >> 8) as u8);
        bytes.push(p as u8);
    }
    bytes
}

/// Reduces an ARGB buffer to one luma byte per pixel (Rec. 601
/// weights).  Gray pixels keep their exact value.
pub fn argb_to_gray(pixels: &[u32]) -> Vec<u8> {
    pixels
        .iter()
        .map(|&p| {
            let (r, g, b) = ((p >> 16) & 0xFF, (p >> 8) & 0xFF, p & 0xFF);
            ((r * 299 + g * 587 + b * 114) / 1000) as u8
        })
        .collect()
}
