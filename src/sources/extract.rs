use scraper::{ElementRef, Html, Selector};

use crate::domain::link;
use crate::domain::{Announcement, Source};
use crate::errors::WatchResult;

/// Find the newest announcement on a listing page.
///
/// The first selector of the source that matches anything decides the item;
/// later selectors are only fallbacks for pages laid out differently.
/// `Ok(None)` means nothing to report: no match, no anchor, no `href`, a
/// `javascript:` link, or an empty title. Errors only come from selectors that do not compile.
pub fn extract_first(html: &str, source: &Source) -> WatchResult<Option<Announcement>> {
    let selectors = source.compiled_selectors()?;
    let document = Html::parse_document(html);

    let item = selectors
        .iter()
        .find_map(|selector| document.select(selector).next());

    Ok(item.and_then(|item| announcement_from_item(item, source)))
}

fn announcement_from_item(item: ElementRef<'_>, source: &Source) -> Option<Announcement> {
    let anchor = find_anchor(item)?;

    let title = anchor_text(anchor);
    if title.is_empty() {
        return None;
    }

    let href = anchor.value().attr("href")?;
    if link::is_script(href) {
        return None;
    }
    let link = link::normalize(href, &source.base_url, &source.url);

    Some(Announcement::new(title, link))
}

fn find_anchor(item: ElementRef<'_>) -> Option<ElementRef<'_>> {
    if item.value().name() == "a" {
        return Some(item);
    }

    let anchor_selector = Selector::parse("a").ok()?;
    item.select(&anchor_selector).next()
}

/// Text nodes trimmed and concatenated, inner whitespace runs collapsed
fn anchor_text(anchor: ElementRef<'_>) -> String {
    let joined: String = anchor.text().map(str::trim).collect();
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}
