//! Tests for the voyage export cleaner


use chrono::{DateTime, TimeZone, Utc};

/// Header of a trimmed-down export with one carried-through column
pub const TEST_HEADER: &str = "fartoynavn;avgangshavn_navn;ankomsthavn_navn;\
etd_estimert_avgangstidspunkt;ankomsttidspunkt;byggeaar;bruttotonnasje_bt;\
doedvekttonn_dwt;lengde;bredde;dypgaaende;dypgaaende_aktuell;flaggstat";

/// Build export content from data lines under [`TEST_HEADER`]
pub fn export_content(rows: &[&str]) -> String {
    let mut content = String::from(TEST_HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    content
}

/// Encode a string as ISO-8859-1 bytes (test strings stay within Latin-1)
pub fn latin1_bytes(text: &str) -> Vec<u8> {
    text.chars().map(|c| c as u32 as u8).collect()
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}
