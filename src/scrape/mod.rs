//! Turns saved shipment pages into a staging document.
//!
//! Fetching the pages is left to a browser session outside this crate: it
//! saves the order history as `shipments.html` and each shipment as
//! `{shipment_num}.html`. From there this module
//!
//! - pulls the shipment links out of the history page (`extract_urls`),
//! - reads every listed shipment page and writes the staging JSON
//!   (`parse_pages`).
//!
//! Fields the page does not show, or shows in an unexpected shape, fall back
//! to the defaults declared in [`fields::SHIPMENT_FIELDS`].

pub mod fields;
pub mod html;
pub mod parse;

use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::errors::ServiceError;
use crate::ingest::{save_staging, OrderedEntries, StagedShipment, StagingDocument};
use fields::{PRODUCT_ITEM, SHIPMENT_DATE, SHIPMENT_FIELDS, SHIPMENT_LIST};
use parse::DateCursor;

/// Counts of what one `parse_pages` run staged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    pub shipments: usize,
    pub products: usize,
}

/// Reads one shipment page. `dates` carries the year across pages, so pages
/// must be fed newest first.
pub fn parse_shipment_page(page: &str, dates: &mut DateCursor) -> StagedShipment {
    let mut shipment = StagedShipment::default();

    for field in SHIPMENT_FIELDS {
        let parsed = field.locators.iter().any(|locator| {
            html::select_text(page, locator)
                .and_then(|text| (field.set)(&mut shipment, &text))
                .is_some()
        });
        if !parsed {
            debug!(field = field.name, "field missing or unparsable, using default");
            (field.default)(&mut shipment);
        }
    }

    shipment.shipment_date =
        html::select_text(page, &SHIPMENT_DATE).and_then(|text| dates.resolve(&text));

    let mut products = OrderedEntries::new();
    for (index, item) in html::select_all(page, &PRODUCT_ITEM).into_iter().enumerate() {
        products.insert((index + 1).to_string(), fields::product_from_item(item));
    }
    shipment.products = products;

    shipment
}

/// Shipment number from a shipment URL: its last path segment.
pub fn shipment_num_from_url(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .map(str::trim)
        .filter(|num| !num.is_empty())
}

/// Shipment links on the order history page, in page order.
pub fn shipment_urls(history_page: &str) -> Vec<String> {
    html::select_all(history_page, &SHIPMENT_LIST)
        .into_iter()
        .flat_map(html::anchor_hrefs)
        .collect()
}

async fn read_text(path: &Path) -> Result<String, ServiceError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ServiceError::StagingError(format!("cannot read {}: {}", path.display(), e)))
}

/// Writes the shipment links found in `history_path` to `urls_path`, one per
/// line. Returns how many were written.
#[instrument(skip_all, fields(history = %history_path.display(), urls = %urls_path.display()))]
pub async fn extract_urls(history_path: &Path, urls_path: &Path) -> Result<usize, ServiceError> {
    let page = read_text(history_path).await?;
    let urls = shipment_urls(&page);
    if urls.is_empty() {
        warn!("no shipment links found on the history page");
    }

    let mut body = urls.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    if let Some(parent) = urls_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            ServiceError::StagingError(format!("cannot create {}: {}", parent.display(), e))
        })?;
    }
    tokio::fs::write(urls_path, body).await.map_err(|e| {
        ServiceError::StagingError(format!("cannot write {}: {}", urls_path.display(), e))
    })?;

    info!(count = urls.len(), "shipment links written");
    Ok(urls.len())
}

/// Parses the saved page of every shipment listed in `urls_path` and writes
/// the staging document to `out_path`. A listed shipment without a saved page
/// aborts the run before anything is written.
#[instrument(skip_all, fields(urls = %urls_path.display(), pages = %pages_dir.display(), out = %out_path.display()))]
pub async fn parse_pages(
    urls_path: &Path,
    pages_dir: &Path,
    out_path: &Path,
) -> Result<ParseSummary, ServiceError> {
    let listing = read_text(urls_path).await?;
    let mut dates = DateCursor::starting_today();
    let mut document = StagingDocument::new();
    let mut summary = ParseSummary::default();

    for url in listing.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some(shipment_num) = shipment_num_from_url(url) else {
            warn!(url, "skipping line without a shipment number");
            continue;
        };

        let page = read_text(&pages_dir.join(format!("{shipment_num}.html"))).await?;
        let shipment = parse_shipment_page(&page, &mut dates);
        if shipment.shipping_cost.is_none() {
            warn!(shipment_num, "no shipment total found; ingest will reject this entry");
        }

        summary.shipments += 1;
        summary.products += shipment.products.len();
        document.insert(shipment_num, shipment);
    }

    save_staging(out_path, &document).await?;
    info!(
        shipments = summary.shipments,
        products = summary.products,
        "staging document written"
    );
    Ok(summary)
}
