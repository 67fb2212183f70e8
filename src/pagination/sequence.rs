//! Lazily populated, randomly indexable view over a paginated endpoint

use super::types::{Page, PageSource, RecordFactory};
use crate::error::{Error, Result};
use crate::models::FromRecord;
use crate::types::JsonValue;
use futures::stream::{self, Stream, TryStreamExt};
use std::fmt;
use tracing::{debug, warn};

/// Consecutive empty pages carrying a continuation tolerated before the
/// sequence gives up and treats the source as exhausted
pub const MAX_EMPTY_PAGES: u32 = 16;

/// A remote, server-paginated collection presented as one sequence.
///
/// Records are fetched one page at a time, strictly in page order, and only
/// when an operation needs them. Fetched records are cached for the
/// lifetime of the sequence and never re-fetched.
///
/// ```rust,ignore
/// let mut rates = api.get_tariff_charges(product, tariff, Fuel::Electricity,
///     RateType::StandardUnitRates, &RateQuery::default())?;
///
/// let total = rates.len().await?;       // fetches page 1
/// let latest = rates.get(0).await?;     // cached
/// let oldest = rates.get(-1).await?;    // fetches every page up to the last
/// ```
pub struct PaginatedSequence<T> {
    source: Box<dyn PageSource>,
    factory: RecordFactory<T>,
    page_size: u32,
    materialized: Vec<T>,
    total_count: Option<usize>,
    next_page: u32,
    empty_run: u32,
    exhausted: bool,
}

impl<T> PaginatedSequence<T> {
    /// Create a sequence without touching the network.
    ///
    /// Fails if `page_size` is zero or greater than `max_page_size`.
    pub fn new<S, F>(source: S, factory: F, page_size: u32, max_page_size: u32) -> Result<Self>
    where
        S: PageSource + 'static,
        F: Fn(&JsonValue) -> Result<T> + Send + Sync + 'static,
    {
        if page_size > max_page_size {
            return Err(Error::PageSizeTooLarge { max: max_page_size });
        }
        if page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }

        Ok(Self {
            source: Box::new(source),
            factory: Box::new(factory),
            page_size,
            materialized: Vec::new(),
            total_count: None,
            next_page: 1,
            empty_run: 0,
            exhausted: false,
        })
    }

    /// Create a sequence of records built with [`FromRecord`]
    pub fn for_records<S>(source: S, page_size: u32, max_page_size: u32) -> Result<Self>
    where
        S: PageSource + 'static,
        T: FromRecord + 'static,
    {
        Self::new(source, T::from_record, page_size, max_page_size)
    }

    // ========================================================================
    // Introspection (no network access)
    // ========================================================================

    /// Total reported by the server, if a page has been fetched
    pub fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    /// Records fetched so far, in delivery order
    pub fn materialized(&self) -> &[T] {
        &self.materialized
    }

    pub fn pages_fetched(&self) -> u32 {
        self.next_page - 1
    }

    /// Whether the server has reported the final page
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    // ========================================================================
    // Sequence access
    // ========================================================================

    /// Total number of records on the server.
    ///
    /// Fetches page 1 the first time it is needed.
    pub async fn len(&mut self) -> Result<usize> {
        self.ensure_count().await
    }

    pub async fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Record at `index`; negative values count back from the end
    pub async fn get(&mut self, index: isize) -> Result<&T> {
        let total = self.ensure_count().await?;
        let resolved = resolve_index(index, total)?;
        self.ensure_materialized(resolved + 1).await?;

        self.materialized
            .get(resolved)
            .ok_or_else(|| self.inconsistency(resolved))
    }

    /// Records in `[start, stop)` taking every `step`th one.
    ///
    /// Bounds follow the usual slice rules: negative values count back from
    /// the end, out of range values are clamped and `None` means the start or
    /// end of the sequence. Every record up to `stop` is fetched, even those
    /// skipped by `step`.
    pub async fn slice(
        &mut self,
        start: Option<isize>,
        stop: Option<isize>,
        step: usize,
    ) -> Result<Vec<T>>
    where
        T: Clone,
    {
        if step == 0 {
            return Err(Error::invalid_input("slice step cannot be zero"));
        }

        let total = self.ensure_count().await?;
        let start = clamp_bound(start, total, 0);
        let stop = clamp_bound(stop, total, total);
        if start >= stop {
            return Ok(Vec::new());
        }

        self.ensure_materialized(stop).await?;

        let covered = self
            .materialized
            .get(start..stop)
            .ok_or_else(|| self.inconsistency(stop - 1))?;
        Ok(covered.iter().step_by(step).cloned().collect())
    }

    /// Stream every record from index 0.
    ///
    /// Each call starts again at the beginning, serving cached records first
    /// and fetching one page whenever the cache runs out. The stream ends
    /// after the reported total or when the server has no more pages.
    pub fn iter(&mut self) -> impl Stream<Item = Result<T>> + '_
    where
        T: Clone,
    {
        stream::try_unfold((self, 0_usize), |(seq, index)| async move {
            let record = seq.record_at(index).await?;
            Ok::<_, Error>(record.map(|record| (record, (seq, index + 1))))
        })
    }

    /// Fetch and return every record
    pub async fn collect_all(&mut self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.iter().try_collect().await
    }

    // ========================================================================
    // Fetching
    // ========================================================================

    async fn record_at(&mut self, index: usize) -> Result<Option<T>>
    where
        T: Clone,
    {
        loop {
            if self.total_count.is_some_and(|total| index >= total) {
                return Ok(None);
            }
            if let Some(record) = self.materialized.get(index) {
                return Ok(Some(record.clone()));
            }
            if self.exhausted {
                return Ok(None);
            }
            self.fetch_next_page().await?;
        }
    }

    async fn ensure_count(&mut self) -> Result<usize> {
        if self.total_count.is_none() {
            self.fetch_next_page().await?;
        }
        Ok(self.total_count.unwrap_or(self.materialized.len()))
    }

    /// Fetch pages in order until at least `needed` records are cached
    async fn ensure_materialized(&mut self, needed: usize) -> Result<()> {
        while self.materialized.len() < needed {
            if self.exhausted {
                return Err(self.inconsistency(needed - 1));
            }
            self.fetch_next_page().await?;
        }
        Ok(())
    }

    /// Fetch, convert and append the next page.
    ///
    /// The page is converted in full before anything is stored, so a failed
    /// request or a malformed record leaves the cache and page cursor as they
    /// were.
    async fn fetch_next_page(&mut self) -> Result<()> {
        if self.exhausted {
            return Ok(());
        }

        let page_number = self.next_page;
        debug!(
            source = %self.source.describe(),
            page = page_number,
            page_size = self.page_size,
            "Fetching page"
        );

        let page = self.source.fetch_page(page_number, self.page_size).await?;
        let records = page
            .results
            .iter()
            .map(|raw| (self.factory)(raw))
            .collect::<Result<Vec<T>>>()?;

        self.record_count(&page);

        let received = records.len();
        self.materialized.extend(records);
        self.next_page += 1;

        if !page.has_next() {
            self.exhausted = true;
        } else if received == 0 {
            self.empty_run += 1;
            if self.empty_run >= MAX_EMPTY_PAGES {
                warn!(
                    page = page_number,
                    empty_pages = self.empty_run,
                    "Too many empty pages with a continuation, stopping"
                );
                self.exhausted = true;
            } else {
                debug!(page = page_number, "Empty page with a continuation");
            }
        } else {
            self.empty_run = 0;
        }

        debug!(
            page = page_number,
            received,
            cached = self.materialized.len(),
            exhausted = self.exhausted,
            "Appended page"
        );

        Ok(())
    }

    fn record_count(&mut self, page: &Page) {
        match self.total_count {
            None => self.total_count = Some(page.count),
            Some(total) if total != page.count => {
                warn!(
                    first = total,
                    reported = page.count,
                    page = self.next_page,
                    "Record count changed between pages, keeping the first"
                );
            }
            Some(_) => {}
        }
    }

    fn inconsistency(&self, index: usize) -> Error {
        Error::InconsistentPagination {
            index,
            materialized: self.materialized.len(),
            total: self.total_count.unwrap_or_default(),
        }
    }
}

impl<T> fmt::Debug for PaginatedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginatedSequence")
            .field("source", &self.source.describe())
            .field("page_size", &self.page_size)
            .field("total_count", &self.total_count)
            .field("materialized", &self.materialized.len())
            .field("pages_fetched", &self.pages_fetched())
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

/// Resolve a possibly negative index against `total`
fn resolve_index(index: isize, total: usize) -> Result<usize> {
    let out_of_range = || Error::IndexOutOfRange { index, len: total };

    let resolved = if index < 0 {
        total
            .checked_sub(index.unsigned_abs())
            .ok_or_else(out_of_range)?
    } else {
        index.unsigned_abs()
    };

    if resolved >= total {
        return Err(out_of_range());
    }
    Ok(resolved)
}

/// Clamp a slice bound into `[0, total]`
fn clamp_bound(bound: Option<isize>, total: usize, default: usize) -> usize {
    match bound {
        None => default,
        Some(b) if b < 0 => total.saturating_sub(b.unsigned_abs()),
        Some(b) => b.unsigned_abs().min(total),
    }
}
