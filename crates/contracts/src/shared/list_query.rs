//! Client-side filter → sort → paginate pipeline used by every table widget.
//!
//! Rows are filtered by a [`RowFilter`], sorted by a single [`SortKey`] and
//! cut into 1-based pages. Aggregates are meant to be computed over
//! [`PipelineOutput::matched`], the filtered and sorted set, never over the
//! raw input.

use std::cmp::Ordering;

/// Predicate over one row. Implementations AND their dimensions together and
/// treat an inactive dimension as "pass".
pub trait RowFilter<T> {
    fn matches(&self, row: &T) -> bool;
}

/// A single sortable column of `T`.
pub trait SortKey<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortDirection::Asc
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Asc => "Asc",
            SortDirection::Desc => "Desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K> SortSpec<K> {
    pub fn new(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

impl<K: PartialEq> SortSpec<K> {
    /// Header click: the active column flips direction, another column
    /// starts ascending.
    pub fn clicked(self, key: K) -> Self {
        if self.key == key {
            Self::new(key, self.direction.toggled())
        } else {
            Self::new(key, SortDirection::Asc)
        }
    }
}

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }

    pub fn first(page_size: usize) -> Self {
        Self::new(1, page_size)
    }
}

/// The visible part of a filtered, sorted row set.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<T> {
    pub rows: Vec<T>,
    /// Page actually shown after clamping, 1-based.
    pub page: usize,
    pub page_count: usize,
    pub total_matches: usize,
    /// 1-based number of the first row shown; 0 when nothing matches.
    pub first_row: usize,
    /// 1-based number of the last row shown; 0 when nothing matches.
    pub last_row: usize,
}

impl<T> PageSlice<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput<T> {
    pub matched: Vec<T>,
    pub page: PageSlice<T>,
}

/// Number of pages needed for `total` rows; never less than one.
pub fn page_count(total: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    total.div_ceil(size).max(1)
}

/// Clamps a 1-based page index into `1..=page_count`.
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.max(1).min(page_count.max(1))
}

pub fn filter_rows<T, F>(rows: &[T], filter: &F) -> Vec<T>
where
    T: Clone,
    F: RowFilter<T> + ?Sized,
{
    rows.iter().filter(|row| filter.matches(row)).cloned().collect()
}

/// Sorts in place. `slice::sort_by` is a stable merge sort, and the
/// direction flips the comparator instead of reversing the output, so rows
/// with equal keys keep their input order in both directions.
pub fn sort_rows<T, K>(rows: &mut [T], spec: &SortSpec<K>)
where
    K: SortKey<T>,
{
    rows.sort_by(|a, b| spec.direction.apply(spec.key.compare(a, b)));
}

pub fn paginate<T: Clone>(rows: &[T], request: PageRequest) -> PageSlice<T> {
    let size = request.page_size.max(1);
    let total = rows.len();
    let pages = page_count(total, size);
    let page = clamp_page(request.page, pages);

    let start = (page - 1) * size;
    let end = (start + size).min(total);
    let visible = if start < end {
        rows[start..end].to_vec()
    } else {
        Vec::new()
    };

    PageSlice {
        first_row: if visible.is_empty() { 0 } else { start + 1 },
        last_row: if visible.is_empty() { 0 } else { end },
        rows: visible,
        page,
        page_count: pages,
        total_matches: total,
    }
}

pub fn run_pipeline<T, F, K>(
    rows: &[T],
    filter: &F,
    sort: &SortSpec<K>,
    request: PageRequest,
) -> PipelineOutput<T>
where
    T: Clone,
    F: RowFilter<T> + ?Sized,
    K: SortKey<T>,
{
    let mut matched = filter_rows(rows, filter);
    sort_rows(&mut matched, sort);
    let page = paginate(&matched, request);
    PipelineOutput { matched, page }
}

// ============================================================================
// Comparison helpers
// ============================================================================

/// Case-insensitive collation with an exact tie-break so the order stays total.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Case-insensitive substring match; a blank needle matches everything.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
