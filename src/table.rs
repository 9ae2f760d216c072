use serde::Serialize;

/// Skeleton rows rendered while the owning page is loading.
pub const PLACEHOLDER_ROWS: usize = 5;
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Comparable cell value for client-side sorting. Columns are homogeneous,
/// so the Text/Number split never mixes within one sort.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Text(String),
    Number(i64),
}

impl SortValue {
    pub fn text(value: impl AsRef<str>) -> Self {
        Self::Text(value.as_ref().to_lowercase())
    }

    pub fn number(value: i64) -> Self {
        Self::Number(value)
    }
}

/// Sort, pagination, and delete-staging state for one table instance. All of
/// it operates over the full in-memory list; nothing round-trips to the
/// server per page. Known ceiling for large datasets.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub sort: Option<(String, SortDirection)>,
    pub page: usize,
    pub page_size: usize,
    staged_delete: Option<String>,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            sort: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            staged_delete: None,
        }
    }
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycle a column through ascending, descending, unsorted. Sorting a new
    /// column starts ascending. Either way the view snaps back to page one.
    pub fn toggle_sort(&mut self, column: &str) {
        self.sort = match self.sort.take() {
            Some((col, SortDirection::Asc)) if col == column => {
                Some((col, SortDirection::Desc))
            }
            Some((col, SortDirection::Desc)) if col == column => None,
            _ => Some((column.to_string(), SortDirection::Asc)),
        };
        self.page = 0;
    }

    pub fn page_next(&mut self, row_count: usize) {
        if (self.page + 1) * self.page_size < row_count {
            self.page += 1;
        }
    }

    pub fn page_prev(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// First phase of delete: remember which row the prompt is about.
    pub fn stage_delete(&mut self, id: &str) {
        self.staged_delete = Some(id.to_string());
    }

    /// Dismissing the prompt clears the staged id with no other effect.
    pub fn cancel_delete(&mut self) {
        self.staged_delete = None;
    }

    pub fn staged(&self) -> Option<&str> {
        self.staged_delete.as_deref()
    }

    /// Second phase: only an explicit confirm consumes the staged id.
    pub fn take_staged(&mut self) -> Option<String> {
        self.staged_delete.take()
    }

    /// Compute the render model for the current sort/page over `rows`.
    pub fn view<T: Clone>(
        &self,
        rows: &[T],
        loading: bool,
        sort_value: impl Fn(&T, &str) -> SortValue,
    ) -> TableView<T> {
        if loading {
            return TableView {
                rows: Vec::new(),
                placeholder_rows: PLACEHOLDER_ROWS,
                no_records: false,
                page: 0,
                page_count: 0,
                can_prev: false,
                can_next: false,
            };
        }
        if rows.is_empty() {
            return TableView {
                rows: Vec::new(),
                placeholder_rows: 0,
                no_records: true,
                page: 0,
                page_count: 0,
                can_prev: false,
                can_next: false,
            };
        }

        let mut sorted = rows.to_vec();
        if let Some((column, direction)) = &self.sort {
            sorted.sort_by(|a, b| {
                let ord = sort_value(a, column.as_str()).cmp(&sort_value(b, column.as_str()));
                match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        let page_count = sorted.len().div_ceil(self.page_size);
        let page = self.page.min(page_count - 1);
        let start = page * self.page_size;
        let end = (start + self.page_size).min(sorted.len());

        TableView {
            rows: sorted[start..end].to_vec(),
            placeholder_rows: 0,
            no_records: false,
            page,
            page_count,
            can_prev: page > 0,
            can_next: page + 1 < page_count,
        }
    }
}

/// What the shell renders: either placeholder rows (loading), an explicit
/// no-records marker, or the sorted page window with pagination flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView<T> {
    pub rows: Vec<T>,
    pub placeholder_rows: usize,
    pub no_records: bool,
    pub page: usize,
    pub page_count: usize,
    pub can_prev: bool,
    pub can_next: bool,
}
