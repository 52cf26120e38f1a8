use clap::Args;
use serde_json::{json, Value};

use golden_visa_core::routing;

/// Arguments for route resolution
#[derive(Args)]
pub struct RouteArgs {
    /// Request path, e.g. /tr or /el/elliniko-chryso-visa-ypologistis
    pub path: String,

    /// Value of the locale cookie, if the request carried one
    #[arg(long)]
    pub cookie: Option<String>,

    /// Site origin for canonical and alternate URLs
    #[arg(long)]
    pub site_url: Option<String>,
}

pub fn run_route(args: RouteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let decision = routing::route(&args.path);
    let locale = routing::resolve_locale(Some(&args.path), args.cookie.as_deref());
    let cookie = routing::locale_cookie(&args.path);

    let mut out = json!({
        "decision": decision,
        "locale": locale,
        "canonical_path": routing::canonical_path(locale),
        "set_cookie": cookie.header_value(),
    });
    if let Some(site) = args.site_url.as_deref() {
        out["metadata"] = serde_json::to_value(routing::page_metadata(locale, site))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_url_adds_page_metadata() {
        let out = run_route(RouteArgs {
            path: "/tr/yunanistan-altin-vize-hesaplayici".into(),
            cookie: None,
            site_url: Some("https://example.com".into()),
        })
        .unwrap();

        assert_eq!(out["decision"]["action"], "render");
        assert_eq!(
            out["metadata"]["canonical_url"],
            "https://example.com/tr/yunanistan-altin-vize-hesaplayici"
        );
        assert_eq!(out["metadata"]["open_graph_locale"], "tr_TR");
        assert_eq!(out["metadata"]["alternates"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_no_site_url_no_metadata() {
        let out = run_route(RouteArgs {
            path: "/".into(),
            cookie: Some("el".into()),
            site_url: None,
        })
        .unwrap();
        assert!(out.get("metadata").is_none());
        assert_eq!(out["locale"], "el");
    }
}
