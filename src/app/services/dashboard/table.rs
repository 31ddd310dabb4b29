//! Sortable, paginated voyage table

use crate::app::models::EnrichedRoute;
use crate::constants::{DEFAULT_PAGE_SIZE, DISPLAY_DATETIME_FORMAT, MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// One displayed voyage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub ship_name: Option<String>,
    pub departure_port: Option<String>,
    pub arrival_port: Option<String>,

    #[serde(serialize_with = "serialize_display_timestamp")]
    pub etd: Option<DateTime<Utc>>,

    #[serde(serialize_with = "serialize_display_timestamp")]
    pub eta: Option<DateTime<Utc>>,
}

impl From<&EnrichedRoute> for TableRow {
    fn from(record: &EnrichedRoute) -> Self {
        Self {
            ship_name: record.route.ship_name.clone(),
            departure_port: record.route.departure_port.clone(),
            arrival_port: record.route.arrival_port.clone(),
            etd: record.route.scheduled_departure,
            eta: record.route.arrival,
        }
    }
}

/// Format a timestamp as `DD.MM.YYYY - HH:MM AM/PM`
pub fn format_display_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(DISPLAY_DATETIME_FORMAT).to_string()
}

fn serialize_display_timestamp<S>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(timestamp) => serializer.serialize_str(&format_display_timestamp(timestamp)),
        None => serializer.serialize_none(),
    }
}

/// Column the table can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortColumn {
    #[default]
    ShipName,
    DeparturePort,
    ArrivalPort,
    Etd,
    Eta,
}

impl SortColumn {
    pub const ALL: [SortColumn; 5] = [
        Self::ShipName,
        Self::DeparturePort,
        Self::ArrivalPort,
        Self::Etd,
        Self::Eta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShipName => "ship-name",
            Self::DeparturePort => "departure-port",
            Self::ArrivalPort => "arrival-port",
            Self::Etd => "etd",
            Self::Eta => "eta",
        }
    }

    /// Compare two present values of this column
    fn compare(&self, a: &TableRow, b: &TableRow) -> Option<Ordering> {
        fn both<'a, T: Ord>(a: Option<&'a T>, b: Option<&'a T>) -> Option<(&'a T, &'a T)> {
            Some((a?, b?))
        }

        match self {
            Self::ShipName => both(a.ship_name.as_ref(), b.ship_name.as_ref()).map(|(x, y)| x.cmp(y)),
            Self::DeparturePort => {
                both(a.departure_port.as_ref(), b.departure_port.as_ref()).map(|(x, y)| x.cmp(y))
            }
            Self::ArrivalPort => {
                both(a.arrival_port.as_ref(), b.arrival_port.as_ref()).map(|(x, y)| x.cmp(y))
            }
            Self::Etd => both(a.etd.as_ref(), b.etd.as_ref()).map(|(x, y)| x.cmp(y)),
            Self::Eta => both(a.eta.as_ref(), b.eta.as_ref()).map(|(x, y)| x.cmp(y)),
        }
    }

    fn is_present(&self, row: &TableRow) -> bool {
        match self {
            Self::ShipName => row.ship_name.is_some(),
            Self::DeparturePort => row.departure_port.is_some(),
            Self::ArrivalPort => row.arrival_port.is_some(),
            Self::Etd => row.etd.is_some(),
            Self::Eta => row.eta.is_some(),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(SortColumn::as_str).collect();
                Error::configuration(format!(
                    "Unknown sort column '{}' (expected one of: {})",
                    s,
                    names.join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(Error::configuration(format!(
                "Unknown sort direction '{}' (expected asc or desc)",
                other
            ))),
        }
    }
}

/// Sort key for the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableSort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

/// Stable sort; rows missing the sort value go last in either direction
pub fn sort_rows(rows: &mut [TableRow], sort: TableSort) {
    rows.sort_by(|a, b| {
        match (sort.column.is_present(a), sort.column.is_present(b)) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => return Ordering::Equal,
            (true, true) => {}
        }

        let ordering = sort.column.compare(a, b).unwrap_or(Ordering::Equal);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Explicit pagination state for the table view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Zero-based page index
    pub page_number: usize,

    /// Rows per page, within [5, 50]
    pub page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page_number: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageState {
    /// First page with the given size, clamped to [5, 50]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_number: 0,
            page_size: page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE),
        }
    }

    pub fn with_page(mut self, page_number: usize) -> Self {
        self.page_number = page_number;
        self
    }

    pub fn total_pages(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.page_size.max(1))
    }

    /// Move forward one page, staying on the last page
    pub fn next(self, total_rows: usize) -> Self {
        let last = self.total_pages(total_rows).saturating_sub(1);
        Self {
            page_number: (self.page_number + 1).min(last),
            ..self
        }
    }

    /// Move back one page, staying on the first page
    pub fn previous(self) -> Self {
        Self {
            page_number: self.page_number.saturating_sub(1),
            ..self
        }
    }

    /// Pull an out-of-range page number back onto the last page
    pub fn clamp_to(self, total_rows: usize) -> Self {
        let last = self.total_pages(total_rows).saturating_sub(1);
        Self {
            page_number: self.page_number.min(last),
            ..self
        }
    }

    /// Rows `[page * size, page * size + size)`, empty past the end
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = (self.page_number * self.page_size).min(rows.len());
        let end = (start + self.page_size).min(rows.len());
        &rows[start..end]
    }
}

/// The visible slice of the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    pub sort: TableSort,
    pub page: PageState,
    pub total_pages: usize,
    pub total_rows: usize,
    pub rows: Vec<TableRow>,
}

impl TablePage {
    /// Sort all rows, then cut out the requested page
    pub fn build<'a, I>(records: I, sort: TableSort, page: PageState) -> Self
    where
        I: IntoIterator<Item = &'a EnrichedRoute>,
    {
        let mut rows: Vec<TableRow> = records.into_iter().map(TableRow::from).collect();
        sort_rows(&mut rows, sort);

        let page = page.clamp_to(rows.len());
        Self {
            sort,
            page,
            total_pages: page.total_pages(rows.len()),
            total_rows: rows.len(),
            rows: page.slice(&rows).to_vec(),
        }
    }
}
