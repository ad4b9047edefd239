extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate image;
extern crate log;
extern crate mandelexplorer;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use log::info;
use mandelexplorer::color::{argb_to_gray, argb_to_rgb, argb_to_rgba};
use mandelexplorer::{AlphaFade, Grayscale, Mandelbrot};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_bounds(s: &str) -> Option<(f64, f64, f64, f64)> {
    let parts: Result<Vec<f64>, _> = s.split(',').map(|p| f64::from_str(p.trim())).collect();
    match parts {
        Ok(ref v) if v.len() == 4 => Some((v[0], v[1], v[2], v[3])),
        _ => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const BOUNDS: &str = "bounds";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";
const SHIFT: &str = "shift";
const ZOOM: &str = "zoom";
const FRAMES: &str = "frames";
const PALETTE: &str = "palette";
const SINGLE: &str = "single";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot explorer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file; the extension picks the format"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1280x720")
                .validator(|s| {
                    match parse_pair::<u16>(&s, 'x') {
                        Some((w, h)) if w > 0 && h > 0 => Ok(()),
                        _ => Err("Could not parse output image size".to_string()),
                    }
                })
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(BOUNDS)
                .required(false)
                .long(BOUNDS)
                .short("b")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.2,1,-1.2,1.2")
                .validator(|s| match parse_bounds(&s) {
                    Some(_) => Ok(()),
                    None => Err("Bounds must be real_min,real_max,im_min,im_max".to_string()),
                })
                .help("Viewport into the complex plane"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("50")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        200_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 200000",
                    )
                })
                .help("Iteration depth per pixel"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver (default: all of them)"),
        )
        .arg(
            Arg::with_name(SHIFT)
                .required(false)
                .long(SHIFT)
                .short("p")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse shift"))
                .help("Pan by real,imaginary before each frame"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| match f64::from_str(&s) {
                    Ok(_) => Ok(()),
                    Err(_) => Err("Could not parse zoom".to_string()),
                })
                .help("Zoom before each frame; negative zooms in, positive zooms out"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .required(false)
                .long(FRAMES)
                .short("f")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        10_000,
                        "Could not parse frame count",
                        "Frame count must be between 1 and 10000",
                    )
                })
                .help("Number of frames to render"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .takes_value(true)
                .possible_values(&["gray", "fade"])
                .default_value("gray")
                .help("Color policy"),
        )
        .arg(
            Arg::with_name(SINGLE)
                .required(false)
                .long(SINGLE)
                .help("Render on the main thread only"),
        )
        .get_matches()
}

/// With more than one frame, `out.png` becomes `out-000.png`,
/// `out-001.png` and so on.
fn frame_path(outfile: &str, frame: usize, frames: usize) -> PathBuf {
    let path = Path::new(outfile);
    if frames == 1 {
        return path.to_path_buf();
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("frame");
    let name = match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => format!("{}-{:03}.{}", stem, frame, ext),
        None => format!("{}-{:03}", stem, frame),
    };
    path.with_file_name(name)
}

/// The netpbm family has no alpha channel, so those files go through
/// the PNM encoder with the alpha dropped; everything else goes
/// through `save_buffer` as RGBA.
fn write_image(path: &Path, pixels: &[u32], bounds: (usize, usize)) -> Result<(), failure::Error> {
    let (width, height) = (bounds.0 as u32, bounds.1 as u32);
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());
    let (subtype, samples, color) = match extension.as_ref().map(String::as_str) {
        Some("ppm") | Some("pnm") => (
            PNMSubtype::Pixmap(SampleEncoding::Binary),
            argb_to_rgb(pixels),
            ColorType::RGB(8),
        ),
        Some("pgm") => (
            PNMSubtype::Graymap(SampleEncoding::Binary),
            argb_to_gray(pixels),
            ColorType::Gray(8),
        ),
        Some("pbm") => {
            return Err(failure::err_msg(
                "1-bit PBM output is not supported; use .pgm or .ppm",
            ))
        }
        _ => {
            image::save_buffer(path, &argb_to_rgba(pixels), width, height, ColorType::RGBA(8))?;
            return Ok(());
        }
    };
    let output = File::create(path)?;
    let mut encoder = PNMEncoder::new(output).with_subtype(subtype);
    encoder.encode(&samples[..], width, height, color)?;
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    // The validators have already vetted every value below.
    let (width, height) = parse_pair::<usize>(matches.value_of(SIZE).unwrap_or_default(), 'x')
        .ok_or_else(|| failure::err_msg("Error parsing image dimensions"))?;
    let (real_min, real_max, im_min, im_max) =
        parse_bounds(matches.value_of(BOUNDS).unwrap_or_default())
            .ok_or_else(|| failure::err_msg("Error parsing bounds"))?;
    let iterations = u32::from_str(matches.value_of(ITERATIONS).unwrap_or_default())?;
    let frames = usize::from_str(matches.value_of(FRAMES).unwrap_or_default())?;
    let shift = match matches.value_of(SHIFT) {
        Some(s) => {
            parse_pair::<f64>(s, ',').ok_or_else(|| failure::err_msg("Error parsing shift"))?
        }
        None => (0.0, 0.0),
    };
    let zoom = match matches.value_of(ZOOM) {
        Some(z) => f64::from_str(z)?,
        None => 0.0,
    };
    let outfile = matches.value_of(OUTPUT).unwrap_or_default();

    let mut mandelbrot = Mandelbrot::new(width, height);
    mandelbrot.set_bounds(real_min, real_max, im_min, im_max)?;
    mandelbrot.set_iteration_depth(iterations);
    if let Some(t) = matches.value_of(THREADS) {
        mandelbrot.set_threads(usize::from_str(t)?);
    }
    match matches.value_of(PALETTE) {
        Some("fade") => mandelbrot.set_color_policy(AlphaFade),
        _ => mandelbrot.set_color_policy(Grayscale),
    }

    for frame in 0..frames {
        mandelbrot.shift(shift.0, shift.1)?;
        mandelbrot.zoom(zoom)?;

        let start = Instant::now();
        let pixels = if matches.is_present(SINGLE) {
            mandelbrot.fill_frame_single()
        } else {
            mandelbrot.fill_frame()?
        };
        let compute = start.elapsed();

        let path = frame_path(outfile, frame, frames);
        let start = Instant::now();
        write_image(&path, &pixels, (width, height))?;
        let viewport = mandelbrot.viewport();
        info!(
            "{}: center {}, {}x{}, compute {:?}, write {:?}",
            path.display(),
            viewport.center(),
            viewport.width(),
            viewport.height(),
            compute,
            start.elapsed()
        );
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
