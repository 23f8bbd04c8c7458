use url::Url;

/// How an `href` relates to the page it was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Full `http`/`https` URL, e.g. `http://y.com/c`
    Absolute,
    /// Starts with a single `/`, resolved against the source's base URL
    RootRelative,
    /// Anything else, resolved against the directory of the page URL
    Relative,
}

impl LinkKind {
    pub fn classify(href: &str) -> Self {
        let web_scheme = Url::parse(href)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);

        if web_scheme {
            LinkKind::Absolute
        } else if href.starts_with('/') && !href.starts_with("//") {
            LinkKind::RootRelative
        } else {
            // Scheme-relative `//host/path` also ends up here; URL joining
            // gives it the page's scheme.
            LinkKind::Relative
        }
    }
}

/// `javascript:` pseudo-links never lead to an announcement page
pub fn is_script(href: &str) -> bool {
    href.trim_start()
        .get(..11)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("javascript:"))
}

/// Turn an `href` into an absolute link
pub fn normalize(href: &str, base_url: &str, page_url: &str) -> String {
    let href = href.trim();

    match LinkKind::classify(href) {
        LinkKind::Absolute => href.to_string(),
        LinkKind::RootRelative => {
            let joined = format!("{}{}", base_url.trim_end_matches('/'), href);
            // Parse so the path is percent-encoded the same way as relative links
            Url::parse(&joined)
                .map(|url| url.to_string())
                .unwrap_or(joined)
        }
        LinkKind::Relative => resolve_relative(page_url, href),
    }
}

fn resolve_relative(page_url: &str, href: &str) -> String {
    // `t2024:1.html` would otherwise be read as a URL with scheme `t2024`
    let href_path = if has_leading_colon_segment(href) {
        format!("./{}", href)
    } else {
        href.to_string()
    };

    if let Ok(joined) = Url::parse(page_url).and_then(|page| page.join(&href_path)) {
        return joined.to_string();
    }

    // Page URL did not parse; fall back to plain directory concatenation
    let dir = match page_url.rfind('/') {
        Some(idx) => &page_url[..=idx],
        None => page_url,
    };
    format!("{}{}", dir, href.trim_start_matches("./"))
}

fn has_leading_colon_segment(href: &str) -> bool {
    let first_segment = href.split(['/', '?', '#']).next().unwrap_or("");
    first_segment.contains(':')
}
