//! Campaign attribution capture and propagation.
//!
//! Recognised query parameters are captured once from the entry URL, then
//! re-appended to later page URLs that lost their query string and merged into
//! the outbound checkout link.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::{Url, form_urlencoded};

use crate::storage::{FunnelStore, KeyValueStorage};

pub const CAMPAIGN_PARAMS: [&str; 5] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_content",
    "utm_term",
];
pub const CLICK_ID_PARAMS: [&str; 3] = ["fbclid", "gclid", "ttclid"];

#[must_use]
pub fn is_recognized(param: &str) -> bool {
    CAMPAIGN_PARAMS.contains(&param) || CLICK_ID_PARAMS.contains(&param)
}

/// Flat mapping of attribution parameter names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attribution(BTreeMap<String, String>);

impl Attribution {
    /// Extract recognised, non-empty parameters from a query string (with or
    /// without the leading `?`). The first occurrence of a repeated key wins.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut captured = BTreeMap::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() || !is_recognized(&key) {
                continue;
            }
            captured
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        Self(captured)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// URL-encoded `key=value&…` form, without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attribution {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Capture attribution from the entry page's query string and persist it.
/// Nothing is written when no recognised parameter is present, so an earlier
/// capture survives a later visit without campaign parameters.
pub fn capture_entry_attribution<S: KeyValueStorage>(
    store: &FunnelStore<S>,
    query: &str,
) -> Attribution {
    let captured = Attribution::from_query(query);
    if captured.is_empty() {
        log::debug!("no attribution parameters on entry URL");
    } else {
        log::info!("captured {} attribution parameter(s)", captured.len());
        store.save_attribution(&captured);
    }
    captured
}

/// Query string (with leading `?`) to put back on a page whose URL lost its
/// parameters. `None` when the URL already carries a query or nothing was
/// captured.
#[must_use]
pub fn restored_query<S: KeyValueStorage>(
    store: &FunnelStore<S>,
    current_search: &str,
) -> Option<String> {
    let current = current_search.strip_prefix('?').unwrap_or(current_search);
    if !current.is_empty() {
        return None;
    }
    let stored = store.attribution();
    (!stored.is_empty()).then(|| format!("?{}", stored.to_query_string()))
}

/// Merge captured attribution into the checkout base URL. Captured values
/// replace any same-named parameter already on the base. An unparsable base
/// is returned unchanged.
#[must_use]
pub fn checkout_link(base: &str, attribution: &Attribution) -> String {
    if attribution.is_empty() {
        return base.to_string();
    }
    let mut url = match Url::parse(base) {
        Ok(url) => url,
        Err(err) => {
            log::warn!("checkout base {base:?} is not a valid URL: {err}");
            return base.to_string();
        }
    };
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| attribution.get(key).is_none())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .extend_pairs(attribution.iter());
    url.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn captures_only_recognised_non_empty_params() {
        let captured =
            Attribution::from_query("?utm_source=fb&gclid=123&ref=abc&utm_term=&utm_source=tt");
        let expected: Attribution = [("utm_source", "fb"), ("gclid", "123")]
            .into_iter()
            .collect();
        assert_eq!(captured, expected);
    }

    #[test]
    fn capture_persists_and_skips_empty_queries() {
        let store = FunnelStore::new(MemoryStorage::new());
        capture_entry_attribution(&store, "?utm_source=fb&gclid=123");
        let stored = store.attribution();
        assert_eq!(stored.get("utm_source"), Some("fb"));
        assert_eq!(stored.get("gclid"), Some("123"));
        assert_eq!(stored.len(), 2);

        capture_entry_attribution(&store, "");
        assert_eq!(store.attribution(), stored);
    }

    #[test]
    fn restores_query_only_when_url_has_none() {
        let store = FunnelStore::new(MemoryStorage::new());
        assert_eq!(restored_query(&store, ""), None);
        capture_entry_attribution(&store, "utm_campaign=spring sale&fbclid=x1");
        assert_eq!(
            restored_query(&store, "?"),
            Some("?fbclid=x1&utm_campaign=spring+sale".to_string())
        );
        assert_eq!(restored_query(&store, "?utm_source=ig"), None);
    }

    #[test]
    fn checkout_link_merges_and_overrides_collisions() {
        let attribution: Attribution = [("utm_source", "fb"), ("gclid", "123")]
            .into_iter()
            .collect();
        let link = checkout_link(
            "https://pay.example.com/p/ABC?off=x9&utm_source=site",
            &attribution,
        );
        let parsed = Url::parse(&link).unwrap();
        let pairs: BTreeMap<String, String> = parsed.query_pairs().into_owned().collect();
        assert_eq!(pairs.get("off").map(String::as_str), Some("x9"));
        assert_eq!(pairs.get("utm_source").map(String::as_str), Some("fb"));
        assert_eq!(pairs.get("gclid").map(String::as_str), Some("123"));
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn checkout_link_passes_through_without_attribution_or_valid_base() {
        let empty = Attribution::default();
        assert_eq!(
            checkout_link("https://pay.example.com/p/ABC", &empty),
            "https://pay.example.com/p/ABC"
        );
        let attribution: Attribution = [("gclid", "1")].into_iter().collect();
        assert_eq!(checkout_link("not a url", &attribution), "not a url");
    }
}
