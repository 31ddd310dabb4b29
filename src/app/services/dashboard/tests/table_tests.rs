//! Tests for table sorting and pagination

use super::*;
use crate::app::services::dashboard::table::{format_display_timestamp, sort_rows};
use crate::app::services::dashboard::{
    PageState, SortColumn, SortDirection, TablePage, TableRow, TableSort,
};

fn rows() -> Vec<TableRow> {
    fleet().iter().map(TableRow::from).collect()
}

fn ships(rows: &[TableRow]) -> Vec<&str> {
    rows.iter()
        .map(|r| r.ship_name.as_deref().unwrap_or("-"))
        .collect()
}

#[test]
fn test_display_format() {
    assert_eq!(format_display_timestamp(&at(3, 9)), "03.01.2022 - 09:00 AM");
    assert_eq!(format_display_timestamp(&at(1, 21)), "01.01.2022 - 09:00 PM");
}

#[test]
fn test_timestamps_sort_chronologically_missing_last() {
    let mut table = rows();
    sort_rows(
        &mut table,
        TableSort {
            column: SortColumn::Etd,
            direction: SortDirection::Ascending,
        },
    );

    assert_eq!(
        ships(&table),
        vec!["Polarlys", "Richard With", "Nordlys", "Nordlys", "Kong Harald"]
    );
}

#[test]
fn test_descending_keeps_missing_last() {
    let mut table = rows();
    sort_rows(
        &mut table,
        TableSort {
            column: SortColumn::Eta,
            direction: SortDirection::Descending,
        },
    );

    assert_eq!(table[0].eta, Some(at(5, 13)));
    assert_eq!(table[4].ship_name.as_deref(), Some("Kong Harald"));
}

#[test]
fn test_text_sort_is_stable() {
    let mut table = rows();
    sort_rows(
        &mut table,
        TableSort {
            column: SortColumn::DeparturePort,
            direction: SortDirection::Ascending,
        },
    );

    assert_eq!(
        ships(&table),
        vec!["Nordlys", "Polarlys", "Kong Harald", "Nordlys", "Richard With"]
    );
    assert_eq!(table[3].departure_port.as_deref(), Some("Tromsø"));
}

#[test]
fn test_text_sort_descending_with_missing_names() {
    let mut table = rows();
    table[1].ship_name = None;
    sort_rows(
        &mut table,
        TableSort {
            column: SortColumn::ShipName,
            direction: SortDirection::Descending,
        },
    );

    assert_eq!(
        ships(&table),
        vec!["Richard With", "Nordlys", "Nordlys", "Kong Harald", "-"]
    );

    sort_rows(
        &mut table,
        TableSort {
            column: SortColumn::ArrivalPort,
            direction: SortDirection::Descending,
        },
    );
    let arrivals: Vec<&str> = table
        .iter()
        .map(|r| r.arrival_port.as_deref().unwrap_or("-"))
        .collect();
    assert_eq!(arrivals, vec!["Tromsø", "Tromsø", "Molde", "Bergen", "Bergen"]);
}

#[test]
fn test_sort_column_parsing() {
    assert_eq!("etd".parse::<SortColumn>().unwrap(), SortColumn::Etd);
    assert_eq!(
        "Departure-Port".parse::<SortColumn>().unwrap(),
        SortColumn::DeparturePort
    );
    assert!("speed".parse::<SortColumn>().is_err());
    assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Descending);
    assert!("sideways".parse::<SortDirection>().is_err());
}

#[test]
fn test_page_size_clamped() {
    assert_eq!(PageState::new(1).page_size, 5);
    assert_eq!(PageState::new(500).page_size, 50);
    assert_eq!(PageState::new(20).page_size, 20);
    assert_eq!(PageState::default().page_size, 20);
}

#[test]
fn test_page_navigation_clamps() {
    let page = PageState::new(5);
    assert_eq!(page.total_pages(12), 3);
    assert_eq!(page.total_pages(0), 0);

    let last = page.next(12).next(12).next(12);
    assert_eq!(last.page_number, 2);

    let first = last.previous().previous().previous();
    assert_eq!(first.page_number, 0);

    assert_eq!(page.next(0).page_number, 0);
}

#[test]
fn test_page_slice_bounds() {
    let items: Vec<usize> = (0..12).collect();
    let page = PageState::new(5);

    assert_eq!(page.slice(&items), &[0usize, 1, 2, 3, 4]);
    assert_eq!(page.with_page(2).slice(&items), &[10usize, 11]);
    assert!(page.with_page(7).slice(&items).is_empty());
}

#[test]
fn test_table_page_pulls_back_out_of_range_page() {
    let records = fleet();
    let page = TablePage::build(&records, TableSort::default(), PageState::new(5).with_page(9));

    assert_eq!(page.page.page_number, 0);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.total_rows, 5);
    assert_eq!(page.rows.len(), 5);
}

#[test]
fn test_row_serializes_display_timestamps() {
    let row = TableRow::from(&voyage("Nordlys", "Bergen", "Tromsø", Some(at(3, 9))));
    let json = serde_json::to_value(&row).unwrap();

    assert_eq!(json["etd"], "03.01.2022 - 09:00 AM");
    assert_eq!(json["eta"], "03.01.2022 - 03:00 PM");

    let row = TableRow::from(&voyage("Nordlys", "Bergen", "Tromsø", None));
    assert!(serde_json::to_value(&row).unwrap()["etd"].is_null());
}
