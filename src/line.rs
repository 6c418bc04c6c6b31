//! Isoline engine: binary classification, per-cell segments, and the
//! prev/next segment stitcher that grows maximal polylines.

use std::collections::HashMap;

use log::debug;
use num_traits::Float;

use crate::cancel::CancelToken;
use crate::cases::LINE_CASES;
use crate::error::{Error, Result};
use crate::grid::GridField;
use crate::paths::Paths;
use crate::vertex::{GridVertex, VertexLink};

/// Computes isolines (contour polylines at a single level) over a
/// rectilinear grid.
///
/// Like [`IsoBander`](crate::IsoBander), one instance can be reused across
/// a sweep of levels.
pub struct IsoLiner<'a, T> {
    field: GridField<'a, T>,
    value: T,
    graph: HashMap<GridVertex, VertexLink>,
    cancel: CancelToken,
    cancelled: bool,
}

impl<'a, T: Float> IsoLiner<'a, T> {
    /// Create an engine over the caller's grid buffers; see
    /// [`IsoBander::new`](crate::IsoBander::new) for the layout contract.
    pub fn new(x: &'a [T], y: &'a [T], z: &'a [T], nrow: usize, ncol: usize) -> Result<Self> {
        Ok(Self {
            field: GridField::new(x, y, z, nrow, ncol)?,
            value: T::zero(),
            graph: HashMap::new(),
            cancel: CancelToken::new(),
            cancelled: false,
        })
    }

    /// Set the contour level for the next computation.
    pub fn set_level(&mut self, value: T) {
        self.value = value;
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Classify every cell and stitch its segments into the connectivity
    /// graph.
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

        // Binarize every sample: 1 when at or above the level.
        let mut binary = vec![0u8; nrow * ncol];
        for c in 0..ncol {
            for r in 0..nrow {
                binary[r + c * nrow] = u8::from(self.field.z_at(r, c) >= self.value);
            }
        }

        let mut cells = vec![0u8; (nrow - 1) * (ncol - 1)];
        for r in 0..nrow - 1 {
            for c in 0..ncol - 1 {
                if !self.field.cell_is_finite(r, c) {
                    continue;
                }
                let mut index = 8 * binary[r + c * nrow]
                    + 4 * binary[r + (c + 1) * nrow]
                    + 2 * binary[r + 1 + (c + 1) * nrow]
                    + binary[r + 1 + c * nrow];

                // Saddle cells: route the two segments around whichever
                // diagonal the cell center falls on. At a tie the center
                // counts as at-or-above and the cases keep their meaning.
                if index == 5 && self.field.central_value(r, c) < self.value {
                    index = 10;
                } else if index == 10 && self.field.central_value(r, c) < self.value {
                    index = 5;
                }
                cells[r + c * (nrow - 1)] = index;
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
                for seg in LINE_CASES[cells[r + c * (nrow - 1)] as usize] {
                    let a = GridVertex::new(r as i32 + seg[0].dr, c as i32 + seg[0].dc, seg[0].kind);
                    let b = GridVertex::new(r as i32 + seg[1].dr, c as i32 + seg[1].dc, seg[1].kind);
                    self.merge_segment(a, b)?;
                }
            }
        }

        debug!(
            "line stitching done: {} vertices in the connectivity graph",
            self.graph.len()
        );
        Ok(())
    }

    /// Extract the stitched polylines. Open lines run endpoint to
    /// endpoint; closed loops repeat their starting vertex at the end.
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
            if link.collected {
                continue;
            }
            cur_id += 1;

            // Back-track to the head of the line, or all the way around a
            // closed loop.
            let mut cur = key;
            if !link.prev.is_none() {
                let mut steps = 0;
                loop {
                    cur = self.link_at(cur)?.prev;
                    if cur == key || self.link_at(cur)?.prev.is_none() {
                        break;
                    }
                    steps += 1;
                    if steps > step_limit {
                        return Err(Error::Internal("polyline back-track failed to terminate"));
                    }
                }
            }

            let start = cur;
            let mut steps = 0;
            loop {
                let (px, py) = self.field.vertex_coords(cur, self.value, self.value);
                out.push(px, py, cur_id);

                let entry = self
                    .graph
                    .get_mut(&cur)
                    .ok_or(Error::Internal("polyline walk left the stitched graph"))?;
                entry.collected = true;
                cur = entry.next;
                if cur == start || cur.is_none() {
                    break;
                }
                steps += 1;
                if steps > step_limit {
                    return Err(Error::Internal("polyline walk failed to terminate"));
                }
            }
            // A closed loop ends where it began; emit the anchor once more
            // so the output polyline is explicitly closed.
            if cur == start {
                let (px, py) = self.field.vertex_coords(cur, self.value, self.value);
                out.push(px, py, cur_id);
            }
        }

        debug!("collected {} line vertices in {} paths", out.len(), cur_id);
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

    /// Stitch one segment into the graph, by presence of its endpoints:
    /// fresh segment, extension of one line, or a join of two lines.
    fn merge_segment(&mut self, a: GridVertex, b: GridVertex) -> Result<()> {
        let score = 2 * u8::from(self.graph.contains_key(&b)) + u8::from(self.graph.contains_key(&a));
        match score {
            0 => {
                self.graph.entry(a).or_default().next = b;
                self.graph.entry(b).or_default().prev = a;
            }
            1 => self.attach(a, b)?,
            2 => self.attach(b, a)?,
            3 => self.join(a, b)?,
            _ => return Err(Error::MergeConflict { score }),
        }
        Ok(())
    }

    /// Connect a fresh endpoint to whichever slot of an existing endpoint
    /// is still open.
    fn attach(&mut self, existing: GridVertex, fresh: GridVertex) -> Result<()> {
        let link = self.link_at(existing)?;
        if link.next.is_none() {
            self.graph
                .get_mut(&existing)
                .ok_or(Error::Internal("endpoint vanished while attaching"))?
                .next = fresh;
            self.graph.entry(fresh).or_default().prev = existing;
        } else if link.prev.is_none() {
            self.graph
                .get_mut(&existing)
                .ok_or(Error::Internal("endpoint vanished while attaching"))?
                .prev = fresh;
            self.graph.entry(fresh).or_default().next = existing;
        } else {
            return Err(Error::Internal(
                "segment endpoint lands inside an existing polyline",
            ));
        }
        Ok(())
    }

    /// Join two existing open lines through the segment `(a, b)`. A
    /// head-to-head or tail-to-tail join reverses one of the chains so the
    /// merged line reads in one direction.
    fn join(&mut self, a: GridVertex, b: GridVertex) -> Result<()> {
        let la = self.link_at(a)?;
        let lb = self.link_at(b)?;
        let score = 8 * u8::from(la.next.is_none())
            + 4 * u8::from(la.prev.is_none())
            + 2 * u8::from(lb.next.is_none())
            + u8::from(lb.prev.is_none());
        match score {
            9 => {
                self.set_next(a, b)?;
                self.set_prev(b, a)?;
            }
            6 => {
                self.set_prev(a, b)?;
                self.set_next(b, a)?;
            }
            10 => {
                self.set_next(a, b)?;
                self.set_next(b, a)?;
                self.reverse_chain(b, true)?;
            }
            5 => {
                self.set_prev(a, b)?;
                self.set_prev(b, a)?;
                self.reverse_chain(a, false)?;
            }
            _ => return Err(Error::MergeConflict { score }),
        }
        Ok(())
    }

    fn set_next(&mut self, v: GridVertex, next: GridVertex) -> Result<()> {
        self.graph
            .get_mut(&v)
            .ok_or(Error::Internal("endpoint vanished while joining"))?
            .next = next;
        Ok(())
    }

    fn set_prev(&mut self, v: GridVertex, prev: GridVertex) -> Result<()> {
        self.graph
            .get_mut(&v)
            .ok_or(Error::Internal("endpoint vanished while joining"))?
            .prev = prev;
        Ok(())
    }

    /// Swap prev/next along the chain starting at `start`, walking the old
    /// `prev` direction (`toward_prev`) or the old `next` direction, until
    /// an unset link ends the chain.
    fn reverse_chain(&mut self, start: GridVertex, toward_prev: bool) -> Result<()> {
        let mut cur = start;
        while !cur.is_none() {
            let link = self
                .graph
                .get_mut(&cur)
                .ok_or(Error::Internal("chain reversal left the stitched graph"))?;
            let step = if toward_prev { link.prev } else { link.next };
            std::mem::swap(&mut link.prev, &mut link.next);
            cur = step;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(z: &[f64], nrow: usize, ncol: usize, value: f64) -> Paths<f64> {
        let x: Vec<f64> = (0..ncol).map(|c| c as f64).collect();
        let y: Vec<f64> = (0..nrow).map(|r| r as f64).collect();
        let mut engine = IsoLiner::new(&x, &y, z, nrow, ncol).unwrap();
        engine.set_level(value);
        engine.calculate().unwrap();
        engine.collect().unwrap()
    }

    #[test]
    fn test_uniform_grid_has_no_isoline() {
        let z = [1.0; 4];
        assert!(lines(&z, 2, 2, 0.5).is_empty());
        assert!(lines(&z, 2, 2, 1.5).is_empty());
    }

    #[test]
    fn test_vertical_step_produces_one_segment() {
        // One cell, left corners below, right corners above
        let z = [0.0, 0.0, 1.0, 1.0];
        let paths = lines(&z, 2, 2, 0.5);
        assert_eq!(paths.path_count(), 1);
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_segments_chain_across_cells() {
        // 2x3 grid, two cells side by side, a horizontal front between rows
        let z = [0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
        let paths = lines(&z, 2, 3, 0.5);
        assert_eq!(paths.path_count(), 1);
        assert_eq!(paths.len(), 3);
        assert!(paths.id.iter().all(|&id| id == 1));
    }

    #[test]
    fn test_equal_sample_counts_as_at_level() {
        // A corner exactly at the level classifies as at-or-above
        let z = [0.5, 0.0, 0.0, 0.0];
        let paths = lines(&z, 2, 2, 0.5);
        assert_eq!(paths.path_count(), 1);
    }

    #[test]
    fn test_nan_cell_suppressed() {
        let z = [0.0, 0.0, f64::NAN, 1.0];
        assert!(lines(&z, 2, 2, 0.5).is_empty());
    }

    #[test]
    fn test_closed_loop_repeats_anchor() {
        // Single interior peak: the isoline is a closed diamond
        let z = [
            0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0,
        ];
        let paths = lines(&z, 3, 3, 0.5);
        assert_eq!(paths.path_count(), 1);
        assert_eq!(paths.len(), 5);
        assert_eq!(paths.x[0], paths.x[4]);
        assert_eq!(paths.y[0], paths.y[4]);
    }
}
