//! # isopleth
//!
//! Isolines and isobands from gridded scalar fields via marching squares.
//!
//! Given column coordinates `x`, row coordinates `y` and a matrix of
//! samples `z`, the crate produces **isolines** (contour polylines where
//! the field crosses a level) and **isobands** (closed contour polygons
//! where the field lies between a low and a high level). Per-cell
//! elementary shapes are stitched into maximal, globally consistent paths,
//! including the saddle cells where two contours pass through one cell and
//! the corner points where two distinct rings touch.
//!
//! ## Example
//!
//! ```
//! use isopleth::{isobands, isolines};
//!
//! // A 3x3 grid with a single peak in the middle. `z` stores element
//! // (r, c) at offset r + c * nrow.
//! let x = [0.0, 1.0, 2.0];
//! let y = [0.0, 1.0, 2.0];
//! let z = [
//!     0.0, 0.0, 0.0, // column 0
//!     0.0, 1.0, 0.0, // column 1
//!     0.0, 0.0, 0.0, // column 2
//! ];
//!
//! let lines = isolines(&x, &y, &z, 3, 3, &[0.5]).unwrap();
//! assert_eq!(lines[0].path_count(), 1);
//!
//! let bands = isobands(&x, &y, &z, 3, 3, &[0.5], &[1.5]).unwrap();
//! assert_eq!(bands[0].path_count(), 1);
//! ```
//!
//! ## Isolines vs isobands
//!
//! | | Isolines | Isobands |
//! |---|----------|----------|
//! | **Classification** | Binary (16 cell cases) | Ternary (81 cell cases) |
//! | **Elementary shapes** | 0-2 segments per cell | Triangle through octagon |
//! | **Output paths** | Open or closed polylines | Closed rings |
//! | **Closed paths** | Repeat their first point | Leave the ring implicit |
//!
//! Results come back as [`Paths`]: three parallel columns `x`, `y`, `id`
//! where consecutive entries with the same id form one path. Ids are dense
//! and start at 1 within each result. The [`geojson`] module converts
//! results into `MultiPolygon`/`MultiLineString` features.
//!
//! Both engines are generic over `f32` and `f64`. A computation is
//! single-threaded; the `_par` drivers fan the embarrassingly parallel
//! sweep across levels out to Rayon, one engine per worker.

mod band;
mod cancel;
mod cases;
mod error;
pub mod geojson;
mod grid;
mod line;
mod paths;
mod vertex;

pub use band::IsoBander;
pub use cancel::CancelToken;
pub use error::{Error, Result};
pub use line::IsoLiner;
pub use paths::{Path, PathIter, Paths};

use num_traits::Float;
use rayon::prelude::*;

/// Compute one isoband result per `(vlo[i], vhi[i])` pair.
///
/// One engine is reused across the sweep so the connectivity-map
/// allocation is amortized. Level pairs with `vlo >= vhi` yield empty
/// results; non-finite samples suppress the cells touching them.
pub fn isobands<T: Float>(
    x: &[T],
    y: &[T],
    z: &[T],
    nrow: usize,
    ncol: usize,
    vlo: &[T],
    vhi: &[T],
) -> Result<Vec<Paths<T>>> {
    if vlo.len() != vhi.len() {
        return Err(Error::LevelLenMismatch {
            lo: vlo.len(),
            hi: vhi.len(),
        });
    }

    let mut engine = IsoBander::new(x, y, z, nrow, ncol)?;
    let mut results = Vec::with_capacity(vlo.len());
    for (&lo, &hi) in vlo.iter().zip(vhi) {
        engine.set_levels(lo, hi);
        engine.calculate()?;
        results.push(engine.collect()?);
    }
    Ok(results)
}

/// Compute one isoline result per level in `values`.
pub fn isolines<T: Float>(
    x: &[T],
    y: &[T],
    z: &[T],
    nrow: usize,
    ncol: usize,
    values: &[T],
) -> Result<Vec<Paths<T>>> {
    let mut engine = IsoLiner::new(x, y, z, nrow, ncol)?;
    let mut results = Vec::with_capacity(values.len());
    for &v in values {
        engine.set_level(v);
        engine.calculate()?;
        results.push(engine.collect()?);
    }
    Ok(results)
}

/// Like [`isobands`], with the level sweep fanned out across the Rayon
/// thread pool. Each worker owns its own engine; the grid is shared
/// read-only.
pub fn isobands_par<T: Float + Send + Sync>(
    x: &[T],
    y: &[T],
    z: &[T],
    nrow: usize,
    ncol: usize,
    vlo: &[T],
    vhi: &[T],
) -> Result<Vec<Paths<T>>> {
    if vlo.len() != vhi.len() {
        return Err(Error::LevelLenMismatch {
            lo: vlo.len(),
            hi: vhi.len(),
        });
    }

    vlo.par_iter()
        .zip(vhi.par_iter())
        .map(|(&lo, &hi)| {
            let mut engine = IsoBander::new(x, y, z, nrow, ncol)?;
            engine.set_levels(lo, hi);
            engine.calculate()?;
            engine.collect()
        })
        .collect()
}

/// Like [`isolines`], with the level sweep fanned out across the Rayon
/// thread pool.
pub fn isolines_par<T: Float + Send + Sync>(
    x: &[T],
    y: &[T],
    z: &[T],
    nrow: usize,
    ncol: usize,
    values: &[T],
) -> Result<Vec<Paths<T>>> {
    values
        .par_iter()
        .map(|&v| {
            let mut engine = IsoLiner::new(x, y, z, nrow, ncol)?;
            engine.set_level(v);
            engine.calculate()?;
            engine.collect()
        })
        .collect()
}
