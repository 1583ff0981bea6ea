//! Schedule backend scraping Auckland Council's kerbside collection pages.
//!
//! The council publishes one HTML page per location id. The page carries one
//! or more schedule cards; the first card is the household schedule and the
//! only one read here.

use async_trait::async_trait;
use chrono::Utc;
use lazy_static::lazy_static;
use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html, Selector};

use kerbside_core::{
    model::{CollectionDay, CollectionEntry, LocationId},
    ports::{ScheduleError, SchedulePort},
    schedule::group_collection_days,
};

const BASE_URL: &str = "https://new.aucklandcouncil.govt.nz/en/rubbish-recycling/rubbish-recycling-collections/rubbish-recycling-collection-days";

const COUNCIL_NAME: &str = "Auckland Council";

const INVALID_SELECTOR: &str = "Invalid selector";
lazy_static! {
    static ref SCHEDULE_CARD: Selector =
        Selector::parse("div.acpl-schedule-card").expect(INVALID_SELECTOR);
    static ref ICON_BLOCK: Selector =
        Selector::parse("span.acpl-icon-with-attribute.left").expect(INVALID_SELECTOR);
    static ref FIELD: Selector = Selector::parse("span").expect(INVALID_SELECTOR);
    static ref DATE_LABEL: Selector = Selector::parse("b").expect(INVALID_SELECTOR);
}

/// Schedule port reading the council's per-location collection day page.
pub struct AucklandSchedulePort {
    client: Client,
    base_url: String,
}

impl AucklandSchedulePort {
    /// Create a new port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    /// Create a port fetching from a different base URL.
    ///
    /// The per-location path layout below the base stays the same, which
    /// lets tests point the port at a local server.
    #[must_use]
    pub fn with_base_url<U: Into<String>>(client: Client, base_url: U) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch_page(&self, location: &LocationId) -> Result<String, ScheduleError> {
        let url = format!("{}/{location}.html", self.base_url);
        tracing::debug!(%location, url, "fetching council schedule page");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ScheduleError::Status(status));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl SchedulePort for AucklandSchedulePort {
    fn council_name(&self) -> &str {
        COUNCIL_NAME
    }

    fn query_url(&self, location: &LocationId) -> String {
        format!("{}/{location}", self.base_url)
    }

    async fn collection_days(
        &self,
        location: &LocationId,
    ) -> Result<Vec<CollectionDay>, ScheduleError> {
        let page = self.fetch_page(location).await?;
        let entries = extract_entries(&page)?;
        group_collection_days(entries, Utc::now())
    }
}

// The first schedule card on the page is the household schedule.
fn extract_entries(page: &str) -> Result<Vec<CollectionEntry>, ScheduleError> {
    let document = Html::parse_document(page);
    let card = document
        .select(&SCHEDULE_CARD)
        .next()
        .ok_or(ScheduleError::ScheduleNotFound)?;

    let mut entries = Vec::new();
    for block in card.select(&ICON_BLOCK) {
        let Some(field) = block.select(&FIELD).next() else {
            continue;
        };
        let Some(collection_type) = leading_text(field) else {
            continue;
        };
        let Some(label) = field.select(&DATE_LABEL).next() else {
            continue;
        };
        let date_label: String = label.text().collect();
        if date_label.is_empty() {
            continue;
        }

        entries.push(CollectionEntry {
            date_label,
            collection_type,
        });
    }

    if entries.is_empty() {
        return Err(ScheduleError::NoEntries);
    }

    Ok(entries)
}

/// Text sitting in front of the bold date label, e.g. "Rubbish" in
/// `<span>Rubbish: <b>Thursday, 11 June</b></span>`.
fn leading_text(field: ElementRef<'_>) -> Option<String> {
    let first_child = field.children().next()?;
    let text = first_child.value().as_text()?;
    let collection_type = text.trim().trim_end_matches(':');
    if collection_type.is_empty() {
        return None;
    }

    Some(collection_type.to_owned())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SCHEDULE_PAGE: &str = r#"
        <html>
          <body>
            <h1>Rubbish and recycling collection days</h1>
            <div class="acpl-schedule-card">
              <h2>Household collection</h2>
              <span class="acpl-icon-with-attribute left">
                <span>Rubbish: <b>Thursday, 11 June</b></span>
              </span>
              <span class="acpl-icon-with-attribute left">
                <span>Food scraps: <b>Thursday, 11 June</b></span>
              </span>
              <span class="acpl-icon-with-attribute left">
                <span>Recycling: <b>Thursday, 18 June</b></span>
              </span>
            </div>
            <div class="acpl-schedule-card">
              <h2>Commercial collection</h2>
              <span class="acpl-icon-with-attribute left">
                <span>Rubbish: <b>Friday, 19 June</b></span>
              </span>
            </div>
          </body>
        </html>
    "#;

    fn entry(date_label: &str, collection_type: &str) -> CollectionEntry {
        CollectionEntry {
            date_label: date_label.to_owned(),
            collection_type: collection_type.to_owned(),
        }
    }

    #[test]
    fn reads_entries_from_the_first_schedule_card_only() {
        let entries = extract_entries(SCHEDULE_PAGE).expect("page with a household card");

        assert_eq!(
            entries,
            vec![
                entry("Thursday, 11 June", "Rubbish"),
                entry("Thursday, 11 June", "Food scraps"),
                entry("Thursday, 18 June", "Recycling"),
            ]
        );
    }

    #[test]
    fn keeps_date_label_text_verbatim() {
        let page = r#"
            <div class="acpl-schedule-card">
              <span class="acpl-icon-with-attribute left">
                <span>Rubbish: <b> Thursday, 11 June</b></span>
              </span>
            </div>
        "#;

        let entries = extract_entries(page).expect("card with one entry");
        assert_eq!(entries, vec![entry(" Thursday, 11 June", "Rubbish")]);
    }

    #[test]
    fn skips_blocks_missing_either_field() {
        let page = r#"
            <div class="acpl-schedule-card">
              <span class="acpl-icon-with-attribute left">
                <img src="bin.png">
              </span>
              <span class="acpl-icon-with-attribute left">
                <span><b>Tuesday, 2 June</b></span>
              </span>
              <span class="acpl-icon-with-attribute left">
                <span>Rubbish:</span>
              </span>
              <span class="acpl-icon-with-attribute left">
                <span>Recycling: <b></b></span>
              </span>
              <span class="acpl-icon-with-attribute left">
                <span>Food scraps: <b>Tuesday, 2 June</b></span>
              </span>
            </div>
        "#;

        let entries = extract_entries(page).expect("one readable block remains");
        assert_eq!(entries, vec![entry("Tuesday, 2 June", "Food scraps")]);
    }

    #[test]
    fn fails_without_a_schedule_card() {
        let page = "<html><body><p>No collection information available.</p></body></html>";

        let error = extract_entries(page).expect_err("page without a card");
        assert!(matches!(error, ScheduleError::ScheduleNotFound));
    }

    #[test]
    fn fails_when_the_card_has_no_readable_entries() {
        let page = r#"
            <div class="acpl-schedule-card">
              <h2>Household collection</h2>
              <p>Check back later.</p>
            </div>
        "#;

        let error = extract_entries(page).expect_err("card without entries");
        assert!(matches!(error, ScheduleError::NoEntries));
    }

    #[test]
    fn builds_the_public_query_url_without_the_html_suffix() {
        let port =
            AucklandSchedulePort::with_base_url(Client::new(), "https://example.test/days");
        let location = LocationId(String::from("12345678901"));

        assert_eq!(
            port.query_url(&location),
            "https://example.test/days/12345678901"
        );
    }
}
