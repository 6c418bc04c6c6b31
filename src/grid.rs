//! Validated view over the caller's grid buffers plus coordinate
//! resolution for abstract grid vertices.

use num_traits::Float;

use crate::error::{Error, Result};
use crate::vertex::{GridVertex, VertexKind};

/// Linear interpolation of a threshold crossing between two samples.
///
/// Returns the coordinate where the field crosses `value` on the segment
/// from `(x0, z0)` to `(x1, z1)`. Callers only ask for crossings on edges
/// whose endpoints straddle the threshold, so `z0 != z1`.
pub(crate) fn interpolate<T: Float>(x0: T, x1: T, z0: T, z1: T, value: T) -> T {
    let d = (value - z0) / (z1 - z0);
    x0 + d * (x1 - x0)
}

/// A borrowed, dimension-checked view of a rectilinear grid.
///
/// `x` holds the column coordinates, `y` the row coordinates, and `z` the
/// scalar field with element `(r, c)` at offset `r + c * nrow`.
#[derive(Debug, Clone, Copy)]
pub struct GridField<'a, T> {
    x: &'a [T],
    y: &'a [T],
    z: &'a [T],
    nrow: usize,
    ncol: usize,
}

impl<'a, T: Float> GridField<'a, T> {
    pub fn new(x: &'a [T], y: &'a [T], z: &'a [T], nrow: usize, ncol: usize) -> Result<Self> {
        if x.len() != ncol {
            return Err(Error::XLenMismatch {
                got: x.len(),
                expected: ncol,
            });
        }
        if y.len() != nrow {
            return Err(Error::YLenMismatch {
                got: y.len(),
                expected: nrow,
            });
        }
        if z.len() != nrow * ncol {
            return Err(Error::ZLenMismatch {
                got: z.len(),
                expected: nrow * ncol,
            });
        }
        Ok(Self { x, y, z, nrow, ncol })
    }

    pub fn nrow(&self) -> usize {
        self.nrow
    }

    pub fn ncol(&self) -> usize {
        self.ncol
    }

    #[inline]
    pub fn z_at(&self, r: usize, c: usize) -> T {
        self.z[r + c * self.nrow]
    }

    /// Mean of the four corners of cell `(r, c)`; proxy for the field value
    /// at the cell center, used to disambiguate saddle cells.
    pub fn central_value(&self, r: usize, c: usize) -> T {
        let four = T::one() + T::one() + T::one() + T::one();
        (self.z_at(r, c) + self.z_at(r, c + 1) + self.z_at(r + 1, c) + self.z_at(r + 1, c + 1))
            / four
    }

    /// Whether all four corners of cell `(r, c)` are finite. Cells touching
    /// a NaN or infinity contribute no contour.
    pub fn cell_is_finite(&self, r: usize, c: usize) -> bool {
        self.z_at(r, c).is_finite()
            && self.z_at(r, c + 1).is_finite()
            && self.z_at(r + 1, c).is_finite()
            && self.z_at(r + 1, c + 1).is_finite()
    }

    /// Resolve an abstract grid vertex to output coordinates.
    ///
    /// Corner vertices map straight to the lattice; crossing vertices are
    /// interpolated along their edge at the low or high level.
    pub fn vertex_coords(&self, v: GridVertex, vlo: T, vhi: T) -> (T, T) {
        let r = v.r as usize;
        let c = v.c as usize;
        match v.kind {
            VertexKind::Corner => (self.x[c], self.y[r]),
            VertexKind::HLo => (
                interpolate(
                    self.x[c],
                    self.x[c + 1],
                    self.z_at(r, c),
                    self.z_at(r, c + 1),
                    vlo,
                ),
                self.y[r],
            ),
            VertexKind::HHi => (
                interpolate(
                    self.x[c],
                    self.x[c + 1],
                    self.z_at(r, c),
                    self.z_at(r, c + 1),
                    vhi,
                ),
                self.y[r],
            ),
            VertexKind::VLo => (
                self.x[c],
                interpolate(
                    self.y[r],
                    self.y[r + 1],
                    self.z_at(r, c),
                    self.z_at(r + 1, c),
                    vlo,
                ),
            ),
            VertexKind::VHi => (
                self.x[c],
                interpolate(
                    self.y[r],
                    self.y[r + 1],
                    self.z_at(r, c),
                    self.z_at(r + 1, c),
                    vhi,
                ),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dimension_validation() {
        let x = [0.0, 1.0];
        let y = [0.0, 1.0, 2.0];
        let z = [0.0; 6];

        assert!(GridField::new(&x, &y, &z, 3, 2).is_ok());
        assert_eq!(
            GridField::new(&x, &y, &z, 3, 3).unwrap_err(),
            Error::XLenMismatch { got: 2, expected: 3 }
        );
        assert_eq!(
            GridField::new(&x, &y, &z, 2, 2).unwrap_err(),
            Error::YLenMismatch { got: 3, expected: 2 }
        );
        assert_eq!(
            GridField::new(&x, &y, &z[..4], 3, 2).unwrap_err(),
            Error::ZLenMismatch { got: 4, expected: 6 }
        );
    }

    #[test]
    fn test_column_stride_indexing() {
        // 2 rows, 3 columns; z stored with offset r + c * nrow
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 1.0];
        let z = [10.0, 20.0, 11.0, 21.0, 12.0, 22.0];
        let field = GridField::new(&x, &y, &z, 2, 3).unwrap();

        assert_eq!(field.z_at(0, 0), 10.0);
        assert_eq!(field.z_at(1, 0), 20.0);
        assert_eq!(field.z_at(0, 2), 12.0);
        assert_eq!(field.z_at(1, 2), 22.0);
    }

    #[test]
    fn test_central_value() {
        let x = [0.0, 1.0];
        let y = [0.0, 1.0];
        let z = [1.0, 2.0, 3.0, 4.0];
        let field = GridField::new(&x, &y, &z, 2, 2).unwrap();

        assert_relative_eq!(field.central_value(0, 0), 2.5);
    }

    #[test]
    fn test_cell_is_finite() {
        let x = [0.0, 1.0];
        let y = [0.0, 1.0];
        let z = [1.0, 2.0, f64::NAN, 4.0];
        let field = GridField::new(&x, &y, &z, 2, 2).unwrap();
        assert!(!field.cell_is_finite(0, 0));

        let z = [1.0, 2.0, 3.0, 4.0];
        let field = GridField::new(&x, &y, &z, 2, 2).unwrap();
        assert!(field.cell_is_finite(0, 0));
    }

    #[test]
    fn test_crossing_interpolation() {
        let x = [0.0, 2.0];
        let y = [0.0, 4.0];
        // z[0,0]=0, z[1,0]=1, z[0,1]=1, z[1,1]=1
        let z = [0.0, 1.0, 1.0, 1.0];
        let field = GridField::new(&x, &y, &z, 2, 2).unwrap();

        // Horizontal crossing at row 0 with level 0.5: halfway along x
        let (px, py) = field.vertex_coords(GridVertex::new(0, 0, VertexKind::HLo), 0.5, 0.0);
        assert_relative_eq!(px, 1.0);
        assert_relative_eq!(py, 0.0);

        // Vertical crossing at col 0 with level 0.25: quarter along y
        let (px, py) = field.vertex_coords(GridVertex::new(0, 0, VertexKind::VLo), 0.25, 0.0);
        assert_relative_eq!(px, 0.0);
        assert_relative_eq!(py, 1.0);

        // Corner vertex resolves to the lattice point
        let (px, py) = field.vertex_coords(GridVertex::new(1, 1, VertexKind::Corner), 0.5, 0.0);
        assert_relative_eq!(px, 2.0);
        assert_relative_eq!(py, 4.0);
    }

    #[test]
    fn test_high_level_crossing_uses_vhi() {
        let x = [0.0, 1.0];
        let y = [0.0, 1.0];
        let z = [0.0, 0.0, 10.0, 10.0];
        let field = GridField::new(&x, &y, &z, 2, 2).unwrap();

        let (lo_x, _) = field.vertex_coords(GridVertex::new(0, 0, VertexKind::HLo), 2.0, 8.0);
        let (hi_x, _) = field.vertex_coords(GridVertex::new(0, 0, VertexKind::HHi), 2.0, 8.0);
        assert_relative_eq!(lo_x, 0.2);
        assert_relative_eq!(hi_x, 0.8);
    }
}
