//! Navigation header shared by every page.
use strum::IntoEnumIterator;

use crate::connection::ConnectionState;
use crate::pages::Page;

/// Application title.
pub const TITLE: &str = "Balanced Global Tracker";

/// One-line header: title, tabs with the current page bracketed, connection status.
pub fn nav_bar(current: Page, connection: ConnectionState) -> String {
    let tabs: Vec<String> = Page::iter()
        .map(|page| {
            if page == current {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        })
        .collect();
    format!(
        "{}   {}   {} {}",
        TITLE,
        tabs.join("  "),
        connection.dot(),
        connection
    )
}
