//! Separable zoom resampling of BGRA images.
//!
//! [`Resample`] maps a floating-point sub-rectangle of a source image onto a
//! fixed-size target. Contributor weight tables are built once per call from
//! the selected reconstruction filter, then consumed by a two-pass
//! fixed-point row processor — serially, or band-parallel on a worker pool.
//!
//! # Module structure
//! - `filters`: the six reconstruction kernels
//! - `contributors`: per-output integer weight tables
//! - `row`: fixed-point two-pass row processor and alpha policies
//! - `parallel`: band partitioning and the execution drivers
//! - `pool`: the persistent worker pool

mod contributors;
mod filters;
mod parallel;
mod pool;
mod row;


pub use filters::Filter;
pub use pool::{ThreadPool, default_pool};

use crate::common::{Error, Result};
use crate::image::{Image, ImageDesc, SourceRect};

use contributors::{Contributor, build_contributors};
use row::{AlphaPolicy, Ignore, Independent, PRECISION_HIGH, PRECISION_LOW, PreMultiply};

/// Alpha-channel policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlphaMode {
    /// Every channel is filtered independently.
    #[default]
    Independent,
    /// Color channels are weighted by alpha during accumulation, so fully
    /// transparent pixels contribute no color. Required for correct
    /// blending of translucent sources.
    PreMultiply,
    /// Alpha is not filtered; the output is fully opaque.
    Ignore,
}

impl AlphaMode {
    fn precision(self) -> i32 {
        match self {
            AlphaMode::PreMultiply => PRECISION_LOW,
            AlphaMode::Independent | AlphaMode::Ignore => PRECISION_HIGH,
        }
    }
}

/// Resampling parameters.
///
/// ```rust,ignore
/// Resample::new()
///     .filter(Filter::Lanczos)
///     .alpha(AlphaMode::Ignore)
///     .zoom(&src, &mut dst, rect, 1280, 720)?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Resample {
    /// Reconstruction filter.
    pub filter: Filter,
    /// Support radius in source pixels; `0.0` selects the filter default.
    pub radius: f32,
    /// Alpha-channel policy.
    pub alpha: AlphaMode,
    /// Use the worker pool for [`Resample::apply`].
    pub parallel: bool,
}

enum Exec<'a> {
    Serial,
    Parallel(&'a ThreadPool),
}

struct Tables {
    x: Vec<Contributor>,
    y: Vec<Contributor>,
}

impl Resample {
    pub fn new() -> Resample {
        Resample::default()
    }

    /// Sets the reconstruction filter.
    pub fn filter(mut self, filter: Filter) -> Resample {
        self.filter = filter;
        self
    }

    /// Sets the support radius in source pixels; `0.0` selects the filter
    /// default.
    pub fn radius(mut self, radius: f32) -> Resample {
        self.radius = radius;
        self
    }

    /// Sets the alpha-channel policy.
    pub fn alpha(mut self, alpha: AlphaMode) -> Resample {
        self.alpha = alpha;
        self
    }

    /// Selects serial or pooled execution for [`Resample::apply`].
    pub fn parallel(mut self, parallel: bool) -> Resample {
        self.parallel = parallel;
        self
    }

    /// Remaps the full source into a `new_w`x`new_h` target.
    ///
    /// The target is (re)allocated to the requested size before writing.
    pub fn apply(&self, src: &Image, dst: &mut Image, new_w: usize, new_h: usize) -> Result<()> {
        let rect = SourceRect::full(src.desc().width, src.desc().height);
        if self.parallel {
            self.zoom_parallel(src, dst, rect, new_w, new_h, None)
        } else {
            self.zoom(src, dst, rect, new_w, new_h)
        }
    }

    /// Remaps the sub-rectangle `rect` of the source into a `new_w`x`new_h`
    /// target on the calling thread.
    ///
    /// The rectangle may be fractional and may overhang the source (edge
    /// pixels repeat). The target is (re)allocated before writing; on error
    /// its content is unspecified.
    pub fn zoom(
        &self,
        src: &Image,
        dst: &mut Image,
        rect: SourceRect,
        new_w: usize,
        new_h: usize,
    ) -> Result<()> {
        let tables = self.prepare(src, dst, rect, new_w, new_h)?;
        self.execute(src, dst, &tables, Exec::Serial);
        Ok(())
    }

    /// Remaps the sub-rectangle `rect` of the source into a `new_w`x`new_h`
    /// target, band-parallel on `pool` (or the process default pool).
    ///
    /// Produces output bit-identical to [`Resample::zoom`].
    pub fn zoom_parallel(
        &self,
        src: &Image,
        dst: &mut Image,
        rect: SourceRect,
        new_w: usize,
        new_h: usize,
        pool: Option<&ThreadPool>,
    ) -> Result<()> {
        let tables = self.prepare(src, dst, rect, new_w, new_h)?;
        let pool = pool.unwrap_or_else(|| default_pool());
        self.execute(src, dst, &tables, Exec::Parallel(pool));
        Ok(())
    }

    /// Validates arguments, (re)allocates the target, and builds both
    /// contributor tables.
    fn prepare(
        &self,
        src: &Image,
        dst: &mut Image,
        rect: SourceRect,
        new_w: usize,
        new_h: usize,
    ) -> Result<Tables> {
        let src_w = src.desc().width;
        let src_h = src.desc().height;

        if new_w == 0 || new_h == 0 {
            return Err(Error::EmptyTarget {
                width: new_w,
                height: new_h,
            });
        }
        if src_w == 0 || src_h == 0 {
            return Err(Error::EmptySource {
                width: src_w,
                height: src_h,
            });
        }
        if rect.is_empty() {
            return Err(Error::EmptyRect { rect });
        }
        if !rect.intersects(src_w, src_h) {
            return Err(Error::RectOutsideSource {
                rect,
                width: src_w,
                height: src_h,
            });
        }

        let desc = ImageDesc::new(new_w, new_h);
        if *dst.desc() != desc {
            *dst = Image::new_black(desc);
        }

        let radius = if self.radius <= 0.0 {
            self.filter.default_radius()
        } else {
            self.radius as f64
        };
        let precision = self.alpha.precision();

        Ok(Tables {
            x: build_contributors(
                self.filter,
                radius,
                src_w,
                new_w,
                rect.left,
                rect.width(),
                precision,
            ),
            y: build_contributors(
                self.filter,
                radius,
                src_h,
                new_h,
                rect.top,
                rect.height(),
                precision,
            ),
        })
    }

    /// Dispatches once on the alpha mode so the row loops monomorphize.
    fn execute(&self, src: &Image, dst: &mut Image, tables: &Tables, exec: Exec<'_>) {
        match self.alpha {
            AlphaMode::Independent => Self::execute_policy::<Independent>(src, dst, tables, exec),
            AlphaMode::PreMultiply => Self::execute_policy::<PreMultiply>(src, dst, tables, exec),
            AlphaMode::Ignore => Self::execute_policy::<Ignore>(src, dst, tables, exec),
        }
    }

    fn execute_policy<P: AlphaPolicy>(src: &Image, dst: &mut Image, tables: &Tables, exec: Exec<'_>) {
        match exec {
            Exec::Serial => parallel::run_serial::<P>(src, dst, &tables.x, &tables.y),
            Exec::Parallel(pool) => parallel::run_parallel::<P>(src, dst, &tables.x, &tables.y, pool),
        }
    }
}
