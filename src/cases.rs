//! Static marching-squares case tables.
//!
//! Cells are classified by their four corners: binary (16 cases) for
//! isolines, ternary (81 cases) for isobands. Each case maps to the
//! elementary segments or polygon a cell contributes, expressed as vertex
//! descriptors relative to the cell origin. Saddle cases carry the
//! sub-shapes for each outcome of the central-value comparison.
//!
//! All elementary polygons are listed clockwise. Adjacent cells traverse
//! their shared edge in opposite directions, which is what the stitcher's
//! cancellation scoring relies on.

use crate::vertex::VertexKind;

/// A vertex relative to the cell origin `(r, c)`; `dr` and `dc` are 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CellVertex {
    pub dr: i32,
    pub dc: i32,
    pub kind: VertexKind,
}

const fn g(dr: i32, dc: i32) -> CellVertex {
    CellVertex { dr, dc, kind: VertexKind::Corner }
}

const fn hlo(dr: i32, dc: i32) -> CellVertex {
    CellVertex { dr, dc, kind: VertexKind::HLo }
}

const fn hhi(dr: i32, dc: i32) -> CellVertex {
    CellVertex { dr, dc, kind: VertexKind::HHi }
}

const fn vlo(dr: i32, dc: i32) -> CellVertex {
    CellVertex { dr, dc, kind: VertexKind::VLo }
}

const fn vhi(dr: i32, dc: i32) -> CellVertex {
    CellVertex { dr, dc, kind: VertexKind::VHi }
}

/// One isoband cell case.
#[derive(Debug)]
pub(crate) enum BandCase {
    /// Cell entirely below the low level or entirely at/above the high one.
    Empty,
    /// A single elementary polygon (triangle through octagon).
    Poly(&'static [CellVertex]),
    /// Saddle against the low level: two disjoint pieces when the central
    /// value is below `vlo`, one joined polygon otherwise.
    SaddleLo {
        split: [&'static [CellVertex]; 2],
        joined: &'static [CellVertex],
    },
    /// Saddle against the high level: two disjoint pieces when the central
    /// value is at or above `vhi`, one joined polygon otherwise.
    SaddleHi {
        split: [&'static [CellVertex]; 2],
        joined: &'static [CellVertex],
    },
    /// Saddle against both levels (opposite corners below and above the
    /// band): pieces depend on which side of the band the center falls.
    SaddleCenter {
        below: [&'static [CellVertex]; 2],
        above: [&'static [CellVertex]; 2],
        middle: &'static [CellVertex],
    },
}

/// The 81 isoband cases, indexed by `27*TL + 9*TR + 3*BR + BL` where each
/// corner digit is 0 (below `vlo`), 1 (in band) or 2 (at/above `vhi`).
/// Index comments give the corner digits in TL,TR,BR,BL order.
pub(crate) static BAND_CASES: [BandCase; 81] = [
    // 0: 0000
    BandCase::Empty,
    // 1: 0001
    BandCase::Poly(&[vlo(0, 0), hlo(1, 0), g(1, 0)]),
    // 2: 0002
    BandCase::Poly(&[vlo(0, 0), hlo(1, 0), hhi(1, 0), vhi(0, 0)]),
    // 3: 0010
    BandCase::Poly(&[vlo(0, 1), g(1, 1), hlo(1, 0)]),
    // 4: 0011
    BandCase::Poly(&[vlo(0, 0), vlo(0, 1), g(1, 1), g(1, 0)]),
    // 5: 0012
    BandCase::Poly(&[vlo(0, 0), vlo(0, 1), g(1, 1), hhi(1, 0), vhi(0, 0)]),
    // 6: 0020
    BandCase::Poly(&[hlo(1, 0), vlo(0, 1), vhi(0, 1), hhi(1, 0)]),
    // 7: 0021
    BandCase::Poly(&[g(1, 0), vlo(0, 0), vlo(0, 1), vhi(0, 1), hhi(1, 0)]),
    // 8: 0022
    BandCase::Poly(&[vlo(0, 0), vlo(0, 1), vhi(0, 1), vhi(0, 0)]),
    // 9: 0100
    BandCase::Poly(&[hlo(0, 0), g(0, 1), vlo(0, 1)]),
    // 10: 0101
    BandCase::SaddleLo {
        split: [
            &[g(1, 0), vlo(0, 0), hlo(1, 0)],
            &[g(0, 1), vlo(0, 1), hlo(0, 0)],
        ],
        joined: &[g(1, 0), vlo(0, 0), hlo(0, 0), g(0, 1), vlo(0, 1), hlo(1, 0)],
    },
    // 11: 0102
    BandCase::SaddleLo {
        split: [
            &[g(0, 1), vlo(0, 1), hlo(0, 0)],
            &[vlo(0, 0), hlo(1, 0), hhi(1, 0), vhi(0, 0)],
        ],
        joined: &[
            g(0, 1),
            vlo(0, 1),
            hlo(1, 0),
            hhi(1, 0),
            vhi(0, 0),
            vlo(0, 0),
            hlo(0, 0),
        ],
    },
    // 12: 0110
    BandCase::Poly(&[hlo(0, 0), g(0, 1), g(1, 1), hlo(1, 0)]),
    // 13: 0111
    BandCase::Poly(&[g(1, 0), vlo(0, 0), hlo(0, 0), g(0, 1), g(1, 1)]),
    // 14: 0112
    BandCase::Poly(&[g(0, 1), g(1, 1), hhi(1, 0), vhi(0, 0), vlo(0, 0), hlo(0, 0)]),
    // 15: 0120
    BandCase::Poly(&[g(0, 1), vhi(0, 1), hhi(1, 0), hlo(1, 0), hlo(0, 0)]),
    // 16: 0121
    BandCase::Poly(&[g(0, 1), vhi(0, 1), hhi(1, 0), g(1, 0), vlo(0, 0), hlo(0, 0)]),
    // 17: 0122
    BandCase::Poly(&[g(0, 1), vhi(0, 1), vhi(0, 0), vlo(0, 0), hlo(0, 0)]),
    // 18: 0200
    BandCase::Poly(&[vlo(0, 1), hlo(0, 0), hhi(0, 0), vhi(0, 1)]),
    // 19: 0201
    BandCase::SaddleLo {
        split: [
            &[g(1, 0), vlo(0, 0), hlo(1, 0)],
            &[vlo(0, 1), hlo(0, 0), hhi(0, 0), vhi(0, 1)],
        ],
        joined: &[
            g(1, 0),
            vlo(0, 0),
            hlo(0, 0),
            hhi(0, 0),
            vhi(0, 1),
            vlo(0, 1),
            hlo(1, 0),
        ],
    },
    // 20: 0202
    BandCase::SaddleCenter {
        below: [
            &[vlo(0, 0), hlo(1, 0), hhi(1, 0), vhi(0, 0)],
            &[vlo(0, 1), hlo(0, 0), hhi(0, 0), vhi(0, 1)],
        ],
        above: [
            &[vlo(0, 0), hlo(0, 0), hhi(0, 0), vhi(0, 0)],
            &[vlo(0, 1), hlo(1, 0), hhi(1, 0), vhi(0, 1)],
        ],
        middle: &[
            vlo(0, 0),
            hlo(0, 0),
            hhi(0, 0),
            vhi(0, 1),
            vlo(0, 1),
            hlo(1, 0),
            hhi(1, 0),
            vhi(0, 0),
        ],
    },
    // 21: 0210
    BandCase::Poly(&[g(1, 1), hlo(1, 0), hlo(0, 0), hhi(0, 0), vhi(0, 1)]),
    // 22: 0211
    BandCase::Poly(&[g(1, 0), vlo(0, 0), hlo(0, 0), hhi(0, 0), vhi(0, 1), g(1, 1)]),
    // 23: 0212
    BandCase::SaddleHi {
        split: [
            &[g(1, 1), hhi(1, 0), vhi(0, 1)],
            &[hhi(0, 0), vhi(0, 0), vlo(0, 0), hlo(0, 0)],
        ],
        joined: &[
            g(1, 1),
            hhi(1, 0),
            vhi(0, 0),
            vlo(0, 0),
            hlo(0, 0),
            hhi(0, 0),
            vhi(0, 1),
        ],
    },
    // 24: 0220
    BandCase::Poly(&[hlo(0, 0), hhi(0, 0), hhi(1, 0), hlo(1, 0)]),
    // 25: 0221
    BandCase::Poly(&[g(1, 0), vlo(0, 0), hlo(0, 0), hhi(0, 0), hhi(1, 0)]),
    // 26: 0222
    BandCase::Poly(&[hhi(0, 0), vhi(0, 0), vlo(0, 0), hlo(0, 0)]),
    // 27: 1000
    BandCase::Poly(&[vlo(0, 0), g(0, 0), hlo(0, 0)]),
    // 28: 1001
    BandCase::Poly(&[hlo(0, 0), hlo(1, 0), g(1, 0), g(0, 0)]),
    // 29: 1002
    BandCase::Poly(&[g(0, 0), hlo(0, 0), hlo(1, 0), hhi(1, 0), vhi(0, 0)]),
    // 30: 1010
    BandCase::SaddleLo {
        split: [
            &[g(0, 0), hlo(0, 0), vlo(0, 0)],
            &[g(1, 1), hlo(1, 0), vlo(0, 1)],
        ],
        joined: &[g(0, 0), hlo(0, 0), vlo(0, 1), g(1, 1), hlo(1, 0), vlo(0, 0)],
    },
    // 31: 1011
    BandCase::Poly(&[g(0, 0), hlo(0, 0), vlo(0, 1), g(1, 1), g(1, 0)]),
    // 32: 1012
    BandCase::Poly(&[g(0, 0), hlo(0, 0), vlo(0, 1), g(1, 1), hhi(1, 0), vhi(0, 0)]),
    // 33: 1020
    BandCase::SaddleLo {
        split: [
            &[g(0, 0), hlo(0, 0), vlo(0, 0)],
            &[hlo(1, 0), vlo(0, 1), vhi(0, 1), hhi(1, 0)],
        ],
        joined: &[
            g(0, 0),
            hlo(0, 0),
            vlo(0, 1),
            vhi(0, 1),
            hhi(1, 0),
            hlo(1, 0),
            vlo(0, 0),
        ],
    },
    // 34: 1021
    BandCase::Poly(&[g(0, 0), hlo(0, 0), vlo(0, 1), vhi(0, 1), hhi(1, 0), g(1, 0)]),
    // 35: 1022
    BandCase::Poly(&[g(0, 0), hlo(0, 0), vlo(0, 1), vhi(0, 1), vhi(0, 0)]),
    // 36: 1100
    BandCase::Poly(&[g(0, 0), g(0, 1), vlo(0, 1), vlo(0, 0)]),
    // 37: 1101
    BandCase::Poly(&[g(0, 0), g(0, 1), vlo(0, 1), hlo(1, 0), g(1, 0)]),
    // 38: 1102
    BandCase::Poly(&[g(0, 0), g(0, 1), vlo(0, 1), hlo(1, 0), hhi(1, 0), vhi(0, 0)]),
    // 39: 1110
    BandCase::Poly(&[g(0, 0), g(0, 1), g(1, 1), hlo(1, 0), vlo(0, 0)]),
    // 40: 1111
    BandCase::Poly(&[g(0, 0), g(0, 1), g(1, 1), g(1, 0)]),
    // 41: 1112
    BandCase::Poly(&[g(0, 0), g(0, 1), g(1, 1), hhi(1, 0), vhi(0, 0)]),
    // 42: 1120
    BandCase::Poly(&[g(0, 0), g(0, 1), vhi(0, 1), hhi(1, 0), hlo(1, 0), vlo(0, 0)]),
    // 43: 1121
    BandCase::Poly(&[g(0, 0), g(0, 1), vhi(0, 1), hhi(1, 0), g(1, 0)]),
    // 44: 1122
    BandCase::Poly(&[g(0, 0), g(0, 1), vhi(0, 1), vhi(0, 0)]),
    // 45: 1200
    BandCase::Poly(&[g(0, 0), hhi(0, 0), vhi(0, 1), vlo(0, 1), vlo(0, 0)]),
    // 46: 1201
    BandCase::Poly(&[g(0, 0), hhi(0, 0), vhi(0, 1), vlo(0, 1), hlo(1, 0), g(1, 0)]),
    // 47: 1202
    BandCase::SaddleHi {
        split: [
            &[g(0, 0), hhi(0, 0), vhi(0, 0)],
            &[hhi(1, 0), vhi(0, 1), vlo(0, 1), hlo(1, 0)],
        ],
        joined: &[
            g(0, 0),
            hhi(0, 0),
            vhi(0, 1),
            vlo(0, 1),
            hlo(1, 0),
            hhi(1, 0),
            vhi(0, 0),
        ],
    },
    // 48: 1210
    BandCase::Poly(&[g(0, 0), hhi(0, 0), vhi(0, 1), g(1, 1), hlo(1, 0), vlo(0, 0)]),
    // 49: 1211
    BandCase::Poly(&[g(0, 0), hhi(0, 0), vhi(0, 1), g(1, 1), g(1, 0)]),
    // 50: 1212
    BandCase::SaddleHi {
        split: [
            &[g(0, 0), hhi(0, 0), vhi(0, 0)],
            &[g(1, 1), hhi(1, 0), vhi(0, 1)],
        ],
        joined: &[g(0, 0), hhi(0, 0), vhi(0, 1), g(1, 1), hhi(1, 0), vhi(0, 0)],
    },
    // 51: 1220
    BandCase::Poly(&[g(0, 0), hhi(0, 0), hhi(1, 0), hlo(1, 0), vlo(0, 0)]),
    // 52: 1221
    BandCase::Poly(&[hhi(0, 0), hhi(1, 0), g(1, 0), g(0, 0)]),
    // 53: 1222
    BandCase::Poly(&[vhi(0, 0), g(0, 0), hhi(0, 0)]),
    // 54: 2000
    BandCase::Poly(&[hlo(0, 0), vlo(0, 0), vhi(0, 0), hhi(0, 0)]),
    // 55: 2001
    BandCase::Poly(&[g(1, 0), vhi(0, 0), hhi(0, 0), hlo(0, 0), hlo(1, 0)]),
    // 56: 2002
    BandCase::Poly(&[hhi(0, 0), hlo(0, 0), hlo(1, 0), hhi(1, 0)]),
    // 57: 2010
    BandCase::SaddleLo {
        split: [
            &[g(1, 1), hlo(1, 0), vlo(0, 1)],
            &[hlo(0, 0), vlo(0, 0), vhi(0, 0), hhi(0, 0)],
        ],
        joined: &[
            g(1, 1),
            hlo(1, 0),
            vlo(0, 0),
            vhi(0, 0),
            hhi(0, 0),
            hlo(0, 0),
            vlo(0, 1),
        ],
    },
    // 58: 2011
    BandCase::Poly(&[g(1, 0), vhi(0, 0), hhi(0, 0), hlo(0, 0), vlo(0, 1), g(1, 1)]),
    // 59: 2012
    BandCase::Poly(&[g(1, 1), hhi(1, 0), hhi(0, 0), hlo(0, 0), vlo(0, 1)]),
    // 60: 2020
    BandCase::SaddleCenter {
        below: [
            &[vhi(0, 0), hhi(0, 0), hlo(0, 0), vlo(0, 0)],
            &[vhi(0, 1), hhi(1, 0), hlo(1, 0), vlo(0, 1)],
        ],
        above: [
            &[vhi(0, 0), hhi(1, 0), hlo(1, 0), vlo(0, 0)],
            &[vhi(0, 1), hhi(0, 0), hlo(0, 0), vlo(0, 1)],
        ],
        middle: &[
            vhi(0, 0),
            hhi(0, 0),
            hlo(0, 0),
            vlo(0, 1),
            vhi(0, 1),
            hhi(1, 0),
            hlo(1, 0),
            vlo(0, 0),
        ],
    },
    // 61: 2021
    BandCase::SaddleHi {
        split: [
            &[g(1, 0), vhi(0, 0), hhi(1, 0)],
            &[vhi(0, 1), hhi(0, 0), hlo(0, 0), vlo(0, 1)],
        ],
        joined: &[
            g(1, 0),
            vhi(0, 0),
            hhi(0, 0),
            hlo(0, 0),
            vlo(0, 1),
            vhi(0, 1),
            hhi(1, 0),
        ],
    },
    // 62: 2022
    BandCase::Poly(&[vhi(0, 1), hhi(0, 0), hlo(0, 0), vlo(0, 1)]),
    // 63: 2100
    BandCase::Poly(&[g(0, 1), vlo(0, 1), vlo(0, 0), vhi(0, 0), hhi(0, 0)]),
    // 64: 2101
    BandCase::Poly(&[g(1, 0), vhi(0, 0), hhi(0, 0), g(0, 1), vlo(0, 1), hlo(1, 0)]),
    // 65: 2102
    BandCase::Poly(&[g(0, 1), vlo(0, 1), hlo(1, 0), hhi(1, 0), hhi(0, 0)]),
    // 66: 2110
    BandCase::Poly(&[g(0, 1), g(1, 1), hlo(1, 0), vlo(0, 0), vhi(0, 0), hhi(0, 0)]),
    // 67: 2111
    BandCase::Poly(&[g(1, 0), vhi(0, 0), hhi(0, 0), g(0, 1), g(1, 1)]),
    // 68: 2112
    BandCase::Poly(&[hhi(0, 0), g(0, 1), g(1, 1), hhi(1, 0)]),
    // 69: 2120
    BandCase::SaddleHi {
        split: [
            &[g(0, 1), vhi(0, 1), hhi(0, 0)],
            &[vhi(0, 0), hhi(1, 0), hlo(1, 0), vlo(0, 0)],
        ],
        joined: &[
            g(0, 1),
            vhi(0, 1),
            hhi(1, 0),
            hlo(1, 0),
            vlo(0, 0),
            vhi(0, 0),
            hhi(0, 0),
        ],
    },
    // 70: 2121
    BandCase::SaddleHi {
        split: [
            &[g(1, 0), vhi(0, 0), hhi(1, 0)],
            &[g(0, 1), vhi(0, 1), hhi(0, 0)],
        ],
        joined: &[g(1, 0), vhi(0, 0), hhi(0, 0), g(0, 1), vhi(0, 1), hhi(1, 0)],
    },
    // 71: 2122
    BandCase::Poly(&[hhi(0, 0), g(0, 1), vhi(0, 1)]),
    // 72: 2200
    BandCase::Poly(&[vhi(0, 0), vhi(0, 1), vlo(0, 1), vlo(0, 0)]),
    // 73: 2201
    BandCase::Poly(&[g(1, 0), vhi(0, 0), vhi(0, 1), vlo(0, 1), hlo(1, 0)]),
    // 74: 2202
    BandCase::Poly(&[hhi(1, 0), vhi(0, 1), vlo(0, 1), hlo(1, 0)]),
    // 75: 2210
    BandCase::Poly(&[vhi(0, 0), vhi(0, 1), g(1, 1), hlo(1, 0), vlo(0, 0)]),
    // 76: 2211
    BandCase::Poly(&[vhi(0, 0), vhi(0, 1), g(1, 1), g(1, 0)]),
    // 77: 2212
    BandCase::Poly(&[vhi(0, 1), g(1, 1), hhi(1, 0)]),
    // 78: 2220
    BandCase::Poly(&[vhi(0, 0), hhi(1, 0), hlo(1, 0), vlo(0, 0)]),
    // 79: 2221
    BandCase::Poly(&[vhi(0, 0), hhi(1, 0), g(1, 0)]),
    // 80: 2222
    BandCase::Empty,
];

/// The 16 isoline cases, indexed by `8*TL + 4*TR + 2*BR + BL` where each
/// corner bit is 1 when the sample is at or above the level. Saddle cases
/// 5 and 10 are swapped by the classifier when the central value falls
/// below the level, so the table itself stays unconditional.
pub(crate) static LINE_CASES: [&[[CellVertex; 2]]; 16] = [
    &[],
    &[[vlo(0, 0), hlo(1, 0)]],
    &[[vlo(0, 1), hlo(1, 0)]],
    &[[vlo(0, 0), vlo(0, 1)]],
    &[[hlo(0, 0), vlo(0, 1)]],
    &[[vlo(0, 1), hlo(1, 0)], [hlo(0, 0), vlo(0, 0)]],
    &[[hlo(0, 0), hlo(1, 0)]],
    &[[hlo(0, 0), vlo(0, 0)]],
    &[[hlo(0, 0), vlo(0, 0)]],
    &[[hlo(0, 0), hlo(1, 0)]],
    &[[vlo(0, 0), hlo(1, 0)], [hlo(0, 0), vlo(0, 1)]],
    &[[hlo(0, 0), vlo(0, 1)]],
    &[[vlo(0, 0), vlo(0, 1)]],
    &[[vlo(0, 1), hlo(1, 0)]],
    &[[vlo(0, 0), hlo(1, 0)]],
    &[],
];
