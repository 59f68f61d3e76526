//! Band partitioning and the execution drivers.
//!
//! The target is cut into horizontal bands (and, for wide targets on large
//! pools, vertical sub-bands). Bands are pairwise disjoint rectangles; each
//! band job owns a private accumulator cache sized to its source column span
//! and writes only its own pixels, so jobs run with no coordination beyond
//! the final join.

use crate::image::{BYTES_PER_PIXEL, Bgra8, Image};

use super::contributors::Contributor;
use super::pool::ThreadPool;
use super::row::{Accum, AlphaPolicy, process_row};

/// Output columns per horizontal chunk.
const CHUNK_WIDTH: usize = 720;
/// Output rows per vertical chunk.
const CHUNK_HEIGHT: usize = 8;

/// One rectangular slice of the target; bounds are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Band {
    pub xmin: usize,
    pub xmax: usize,
    pub ymin: usize,
    pub ymax: usize,
}

/// Splits a `width`x`height` target into bands for `workers` threads.
///
/// Wide targets are first cut into vertical chunks so per-band caches cover
/// a narrower source span, then rows are divided among the remaining
/// workers. Integer division can produce empty slots for tiny targets;
/// those are skipped.
pub(crate) fn partition(width: usize, height: usize, workers: usize) -> Vec<Band> {
    let x_chunks = (width / CHUNK_WIDTH).min(workers / 4).max(1);
    let y_chunks = (height / CHUNK_HEIGHT).min(workers / x_chunks).max(2);

    let mut bands = Vec::with_capacity(x_chunks * y_chunks);
    for yc in 0..y_chunks {
        let ymin = yc * height / y_chunks;
        let ymax = (yc + 1) * height / y_chunks;
        if ymax == ymin {
            continue;
        }
        for xc in 0..x_chunks {
            let xmin = xc * width / x_chunks;
            let xmax = (xc + 1) * width / x_chunks;
            if xmax == xmin {
                continue;
            }
            bands.push(Band {
                xmin,
                xmax: xmax - 1,
                ymin,
                ymax: ymax - 1,
            });
        }
    }
    bands
}

/// Raw write window over the target pixels, shared by all band jobs of one
/// call.
///
/// The pointer aliases the whole target, but jobs only touch the rows and
/// columns of their own band; `partition` guarantees bands are pairwise
/// disjoint, so no byte is ever written through two copies.
#[derive(Clone, Copy)]
struct TargetCells {
    base: *mut u8,
    stride: usize,
}

// Jobs write disjoint rectangles only; see `TargetCells`.
unsafe impl Send for TargetCells {}
unsafe impl Sync for TargetCells {}

impl TargetCells {
    fn new(dst: &mut Image) -> TargetCells {
        TargetCells {
            base: dst.bytes_mut().as_mut_ptr(),
            stride: dst.desc().stride,
        }
    }

    /// Mutable pixel slice for columns `xmin..=xmax` of row `y`.
    ///
    /// # Safety
    /// The caller must hold the band partitioning invariant: every
    /// `(row, column)` cell is handed to exactly one live slice.
    #[inline]
    unsafe fn row_slice(&self, y: usize, xmin: usize, xmax: usize) -> &mut [Bgra8] {
        // SAFETY: the target outlives the dispatch scope, the requested
        // range lies inside row `y`, and per the caller contract no other
        // slice overlaps it.
        unsafe {
            let start = self.base.add(y * self.stride + xmin * BYTES_PER_PIXEL);
            std::slice::from_raw_parts_mut(start.cast::<Bgra8>(), xmax - xmin + 1)
        }
    }
}

/// Renders every row of one band with a band-private cache.
fn process_band<P: AlphaPolicy>(
    src: &Image,
    x_contribs: &[Contributor],
    y_contribs: &[Contributor],
    band: Band,
    target: TargetCells,
) {
    let xmin_src = x_contribs[band.xmin].min;
    let xmax_src = {
        let c = &x_contribs[band.xmax];
        c.min + c.high()
    };
    let mut cache = vec![Accum::default(); xmax_src - xmin_src + 1];

    for y in band.ymin..=band.ymax {
        // SAFETY: bands from `partition` are pairwise disjoint and `y`,
        // `xmin..=xmax` stay inside this band.
        let out = unsafe { target.row_slice(y, band.xmin, band.xmax) };
        process_row::<P>(
            src,
            &y_contribs[y],
            x_contribs,
            band.xmin,
            band.xmax,
            xmin_src,
            &mut cache,
            out,
        );
    }
}

/// Processes the whole target as a single band on the calling thread.
pub(crate) fn run_serial<P: AlphaPolicy>(
    src: &Image,
    dst: &mut Image,
    x_contribs: &[Contributor],
    y_contribs: &[Contributor],
) {
    let band = Band {
        xmin: 0,
        xmax: dst.desc().width - 1,
        ymin: 0,
        ymax: dst.desc().height - 1,
    };
    let target = TargetCells::new(dst);
    process_band::<P>(src, x_contribs, y_contribs, band, target);
}

/// Dispatches all bands onto the pool and waits for completion.
pub(crate) fn run_parallel<P: AlphaPolicy>(
    src: &Image,
    dst: &mut Image,
    x_contribs: &[Contributor],
    y_contribs: &[Contributor],
    pool: &ThreadPool,
) {
    let width = dst.desc().width;
    let height = dst.desc().height;
    let bands = partition(width, height, pool.threads());
    tracing::debug!(
        width,
        height,
        bands = bands.len(),
        threads = pool.threads(),
        "dispatching resample bands"
    );

    let target = TargetCells::new(dst);
    pool.scope(|s| {
        for &band in &bands {
            s.spawn(move |_| process_band::<P>(src, x_contribs, y_contribs, band, target));
        }
    });
}
