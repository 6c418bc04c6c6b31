//! Isoband engine: ternary classification, clockwise elementary polygons,
//! and the score-based stitcher that merges them into closed rings.

use std::collections::HashMap;

use arrayvec::ArrayVec;
use log::debug;
use num_traits::Float;

use crate::cancel::CancelToken;
use crate::cases::{BandCase, CellVertex, BAND_CASES};
use crate::error::{Error, Result};
use crate::grid::GridField;
use crate::paths::Paths;
use crate::vertex::{GridVertex, VertexLink};

/// Computes isobands (contour polygons between a low and a high level)
/// over a rectilinear grid.
///
/// One instance can be reused across a sweep of level pairs; the stitched
/// graph is cleared at the start of every [`calculate`](Self::calculate)
/// and the hash table's capacity is retained.
pub struct IsoBander<'a, T> {
    field: GridField<'a, T>,
    vlo: T,
    vhi: T,
    graph: HashMap<GridVertex, VertexLink>,
    poly: ArrayVec<GridVertex, 8>,
    cancel: CancelToken,
    cancelled: bool,
}

impl<'a, T: Float> IsoBander<'a, T> {
    /// Create an engine over the caller's grid buffers.
    ///
    /// `x` holds `ncol` column coordinates, `y` holds `nrow` row
    /// coordinates, and `z` holds `nrow * ncol` samples with element
    /// `(r, c)` at offset `r + c * nrow`. Dimension mismatches are
    /// rejected here, before any computation.
    pub fn new(x: &'a [T], y: &'a [T], z: &'a [T], nrow: usize, ncol: usize) -> Result<Self> {
        Ok(Self {
            field: GridField::new(x, y, z, nrow, ncol)?,
            vlo: T::zero(),
            vhi: T::zero(),
            graph: HashMap::new(),
            poly: ArrayVec::new(),
            cancel: CancelToken::new(),
            cancelled: false,
        })
    }

    /// Set the band levels for the next computation.
    pub fn set_levels(&mut self, vlo: T, vhi: T) {
        self.vlo = vlo;
        self.vhi = vhi;
    }

    /// Handle for cancelling a computation, possibly from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Whether the last `calculate` observed the cancellation flag.
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Classify every cell and stitch its elementary polygons into the
    /// connectivity graph. Call [`collect`](Self::collect) afterwards to
    /// extract the rings.
    pub fn calculate(&mut self) -> Result<()> {
        self.graph.clear();
        self.cancelled = self.cancel.is_cancelled();
        if self.cancelled {
            return Ok(());
        }

        let nrow = self.field.nrow();
        let ncol = self.field.ncol();
        if nrow < 2 || ncol < 2 {
            return Ok(());
        }
        // Inverted or empty level ranges contour nothing: the band is the
        // half-open interval [vlo, vhi).
        if !(self.vlo < self.vhi) {
            debug!("empty level range, skipping band computation");
            return Ok(());
        }

        // Ternarize every sample: 0 below the band, 1 inside, 2 at/above.
        let mut ternary = vec![0u8; nrow * ncol];
        for c in 0..ncol {
            for r in 0..nrow {
                let z = self.field.z_at(r, c);
                ternary[r + c * nrow] =
                    u8::from(z >= self.vlo && z < self.vhi) + 2 * u8::from(z >= self.vhi);
            }
        }

        // Per-cell case index; cells touching non-finite samples stay 0.
        let mut cells = vec![0u8; (nrow - 1) * (ncol - 1)];
        for r in 0..nrow - 1 {
            for c in 0..ncol - 1 {
                if self.field.cell_is_finite(r, c) {
                    cells[r + c * (nrow - 1)] = 27 * ternary[r + c * nrow]
                        + 9 * ternary[r + (c + 1) * nrow]
                        + 3 * ternary[r + 1 + (c + 1) * nrow]
                        + ternary[r + 1 + c * nrow];
                }
            }
        }

        if self.check_cancelled() {
            return Ok(());
        }

        for r in 0..nrow - 1 {
            if self.check_cancelled() {
                return Ok(());
            }
            for c in 0..ncol - 1 {
                match &BAND_CASES[cells[r + c * (nrow - 1)] as usize] {
                    BandCase::Empty => {}
                    BandCase::Poly(poly) => self.emit(r, c, poly)?,
                    BandCase::SaddleLo { split, joined } => {
                        if self.field.central_value(r, c) < self.vlo {
                            self.emit(r, c, split[0])?;
                            self.emit(r, c, split[1])?;
                        } else {
                            self.emit(r, c, joined)?;
                        }
                    }
                    BandCase::SaddleHi { split, joined } => {
                        if self.field.central_value(r, c) >= self.vhi {
                            self.emit(r, c, split[0])?;
                            self.emit(r, c, split[1])?;
                        } else {
                            self.emit(r, c, joined)?;
                        }
                    }
                    BandCase::SaddleCenter { below, above, middle } => {
                        let vc = self.field.central_value(r, c);
                        if vc < self.vlo {
                            self.emit(r, c, below[0])?;
                            self.emit(r, c, below[1])?;
                        } else if vc >= self.vhi {
                            self.emit(r, c, above[0])?;
                            self.emit(r, c, above[1])?;
                        } else {
                            self.emit(r, c, middle)?;
                        }
                    }
                }
            }
        }

        debug!(
            "band stitching done: {} vertices in the connectivity graph",
            self.graph.len()
        );
        Ok(())
    }

    /// Extract the stitched rings as paths. Empty if the computation was
    /// cancelled. Vertices are visited in sorted order so path ids are
    /// reproducible across runs.
    pub fn collect(&mut self) -> Result<Paths<T>> {
        let mut out = Paths::new();
        if self.cancelled {
            return Ok(out);
        }

        let mut keys: Vec<GridVertex> = self.graph.keys().copied().collect();
        keys.sort_unstable();

        let step_limit = 2 * self.graph.len() + 1;
        let mut cur_id = 0;
        for key in keys {
            let link = self.link_at(key)?;
            if (link.collected && !link.altpoint)
                || (link.collected && link.collected2 && link.altpoint)
            {
                continue;
            }

            cur_id += 1;
            let start = key;
            let mut cur = start;
            // Pick the chain to trace: the alternate one if this vertex
            // carries two rings and the alternate is still pending.
            let mut prev = if link.altpoint && !link.collected2 {
                link.prev2
            } else {
                link.prev
            };

            let mut steps = 0;
            loop {
                let (px, py) = self.field.vertex_coords(cur, self.vlo, self.vhi);
                out.push(px, py, cur_id);

                let entry = self
                    .graph
                    .get_mut(&cur)
                    .ok_or(Error::Internal("ring walk left the stitched graph"))?;
                // The alternate slot is consumed when we arrived along its
                // recorded predecessor; otherwise the walk is on the
                // primary chain.
                let next = if entry.altpoint && entry.prev2 == prev {
                    entry.collected2 = true;
                    entry.next2
                } else {
                    entry.collected = true;
                    entry.next
                };
                prev = cur;
                cur = next;
                if cur == start {
                    break;
                }
                steps += 1;
                if steps > step_limit {
                    return Err(Error::Internal("ring walk failed to close"));
                }
            }
        }

        debug!("collected {} ring vertices in {} paths", out.len(), cur_id);
        Ok(out)
    }

    fn check_cancelled(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            self.cancelled = true;
        }
        self.cancelled
    }

    fn link_at(&self, v: GridVertex) -> Result<VertexLink> {
        self.graph
            .get(&v)
            .copied()
            .ok_or(Error::Internal("vertex missing from the stitched graph"))
    }

    /// Stage one elementary polygon and merge it into the graph.
    fn emit(&mut self, r: usize, c: usize, verts: &[CellVertex]) -> Result<()> {
        self.poly.clear();
        for v in verts {
            self.poly
                .push(GridVertex::new(r as i32 + v.dr, c as i32 + v.dc, v.kind));
        }
        self.merge_polygon()
    }

    /// Merge the staged elementary polygon into the connectivity graph.
    ///
    /// Every vertex is scored against the graph first and committed only
    /// after the whole polygon has been scored: committing early would let
    /// one vertex's write corrupt a later vertex's score within the same
    /// polygon.
    fn merge_polygon(&mut self) -> Result<()> {
        let n = self.poly.len();
        let mut staged: [VertexLink; 8] = [VertexLink::default(); 8];
        let mut to_delete = [false; 8];

        for i in 0..n {
            let mut link = VertexLink {
                next: self.poly[(i + 1) % n],
                prev: self.poly[(i + n - 1) % n],
                ..VertexLink::default()
            };

            if let Some(existing) = self.graph.get(&self.poly[i]) {
                if !existing.altpoint {
                    let score =
                        2 * u8::from(link.next == existing.prev) + u8::from(link.prev == existing.next);
                    match score {
                        3 => {
                            // Both directions cancel: the shared edge is
                            // interior to the band and the vertex drops out.
                            to_delete[i] = true;
                        }
                        2 => link.next = existing.next,
                        1 => link.prev = existing.prev,
                        _ => {
                            // Two distinct rings touch here; keep the
                            // existing ring's links in the alternate slot.
                            link.prev2 = existing.prev;
                            link.next2 = existing.next;
                            link.altpoint = true;
                        }
                    }
                } else {
                    let score = 8 * u8::from(link.next == existing.prev2)
                        + 4 * u8::from(link.prev == existing.next2)
                        + 2 * u8::from(link.next == existing.prev)
                        + u8::from(link.prev == existing.next);
                    match score {
                        9 => {
                            // Three-way merge through the alternate chain
                            link.next = existing.next2;
                            link.prev = existing.prev;
                        }
                        6 => {
                            link.next = existing.next;
                            link.prev = existing.prev2;
                        }
                        8 => {
                            // Two-way merge on the alternate side only
                            link.next2 = existing.next2;
                            link.prev2 = link.prev;
                            link.prev = existing.prev;
                            link.next = existing.next;
                            link.altpoint = true;
                        }
                        4 => {
                            link.prev2 = existing.prev2;
                            link.next2 = link.next;
                            link.prev = existing.prev;
                            link.next = existing.next;
                            link.altpoint = true;
                        }
                        2 => {
                            // Two-way merge on the primary side only
                            link.next = existing.next;
                            link.prev2 = existing.prev2;
                            link.next2 = existing.next2;
                            link.altpoint = true;
                        }
                        1 => {
                            link.prev = existing.prev;
                            link.prev2 = existing.prev2;
                            link.next2 = existing.next2;
                            link.altpoint = true;
                        }
                        _ => return Err(Error::MergeConflict { score }),
                    }
                }
            }
            staged[i] = link;
        }

        for i in 0..n {
            if to_delete[i] {
                self.graph.remove(&self.poly[i]);
            } else {
                self.graph.insert(self.poly[i], staged[i]);
            }
        }
        Ok(())
    }
}
