//! Locale resolution and canonical routes.
//!
//! Every page lives at `/{locale}/{slug}`. Anything else either redirects
//! there or is not found. The chosen locale is remembered in a cookie.

use serde::{Deserialize, Serialize};

use crate::i18n::{text, Locale, StringKey};

pub const COOKIE_NAME: &str = "NEXT_LOCALE";
pub const COOKIE_PATH: &str = "/";

/// Per-locale page slug.
pub fn slug(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "greece-golden-visa-calculator",
        Locale::Tr => "yunanistan-altin-vize-hesaplayici",
        Locale::El => "elliniko-chryso-visa-ypologistis",
    }
}

pub fn canonical_path(locale: Locale) -> String {
    format!("/{}/{}", locale.code(), slug(locale))
}

/// Locale named by the first path segment, if any.
pub fn locale_from_path(path: &str) -> Option<Locale> {
    Locale::ALL.into_iter().find(|l| {
        let prefix = format!("/{}", l.code());
        path == prefix || path.starts_with(&format!("{prefix}/"))
    })
}

/// Path locale first, then a valid cookie, then English.
pub fn resolve_locale(path: Option<&str>, cookie: Option<&str>) -> Locale {
    path.and_then(locale_from_path)
        .or_else(|| cookie.and_then(|c| c.trim().parse().ok()))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RouteDecision {
    Render { locale: Locale },
    Redirect { location: String },
    NotFound,
}

/// Decide what to do with a request path.
pub fn route(path: &str) -> RouteDecision {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    match segments.as_slice() {
        [] => RouteDecision::Redirect {
            location: canonical_path(Locale::default()),
        },
        [code] => match code.parse::<Locale>() {
            Ok(locale) => RouteDecision::Redirect {
                location: canonical_path(locale),
            },
            Err(_) => RouteDecision::Redirect {
                location: canonical_path(Locale::default()),
            },
        },
        [code, page] => match code.parse::<Locale>() {
            Ok(locale) if *page == slug(locale) => RouteDecision::Render { locale },
            _ => RouteDecision::NotFound,
        },
        _ => RouteDecision::NotFound,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleCookie {
    pub name: String,
    pub value: String,
    pub path: String,
}

impl LocaleCookie {
    pub fn header_value(&self) -> String {
        format!("{}={}; Path={}", self.name, self.value, self.path)
    }
}

/// Cookie set on every response, from the path locale or the default.
pub fn locale_cookie(path: &str) -> LocaleCookie {
    let locale = locale_from_path(path).unwrap_or_default();
    LocaleCookie {
        name: COOKIE_NAME.to_string(),
        value: locale.code().to_string(),
        path: COOKIE_PATH.to_string(),
    }
}

/// Absolute canonical URL of every locale's page.
pub fn alternates(site_url: &str) -> Vec<(Locale, String)> {
    let base = site_url.trim_end_matches('/');
    Locale::ALL
        .into_iter()
        .map(|l| (l, format!("{base}{}", canonical_path(l))))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateLink {
    pub locale: Locale,
    pub url: String,
}

/// Head metadata for one locale's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub locale: Locale,
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    /// e.g. `el_GR`
    pub open_graph_locale: String,
    /// e.g. `el-GR`, for number formatting on the page
    pub intl_locale: String,
    pub alternates: Vec<AlternateLink>,
}

pub fn page_metadata(locale: Locale, site_url: &str) -> PageMetadata {
    let alternates: Vec<AlternateLink> = alternates(site_url)
        .into_iter()
        .map(|(locale, url)| AlternateLink { locale, url })
        .collect();
    let canonical_url = alternates
        .iter()
        .find(|a| a.locale == locale)
        .map(|a| a.url.clone())
        .unwrap_or_default();

    PageMetadata {
        locale,
        title: text(locale, StringKey::Title).to_string(),
        description: text(locale, StringKey::Description).to_string(),
        canonical_url,
        open_graph_locale: locale.open_graph_tag().to_string(),
        intl_locale: locale.intl_tag().to_string(),
        alternates,
    }
}
