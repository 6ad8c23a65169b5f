// SPDX-License-Identifier: Apache-2.0

//! Page-number envelope: `{"paging": {...}, "data": [...], "meta": {"count": N}}`.

use factotum_ws_query::Page;
use serde::{Deserialize, Serialize};

use crate::params::PAGE_PARAM;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageLinks {
    pub current: String,
    pub first: String,
    pub last: String,
    pub next: Option<String>,
    pub previous: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Paging {
    pub links: PageLinks,
    pub page: u64,
    pub pages: u64,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Meta {
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Paginated<T> {
    pub paging: Paging,
    pub data: Vec<T>,
    pub meta: Meta,
}

fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}

/// Absolute request URL used to derive page links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUrl {
    origin: String,
    path: String,
    query: Vec<(String, String)>,
}

impl RequestUrl {
    /// `origin` is `scheme://host[:port]`, without a trailing slash.
    #[must_use]
    pub fn new(origin: &str, path: &str, query: Vec<(String, String)>) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            path: path.to_string(),
            query,
        }
    }

    /// Page 1 drops the page parameter; other pages replace it.
    #[must_use]
    pub fn page_link(&self, page: u64) -> String {
        let mut pairs: Vec<(&str, String)> = self
            .query
            .iter()
            .filter(|(k, _)| k != PAGE_PARAM)
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();
        if page != 1 {
            pairs.push((PAGE_PARAM, page.to_string()));
        }
        // Stable sort keeps repeated keys in request order.
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        let query = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&");
        if query.is_empty() {
            format!("{}{}", self.origin, self.path)
        } else {
            format!("{}{}?{query}", self.origin, self.path)
        }
    }
}

impl<T> Paginated<T> {
    #[must_use]
    pub fn from_page(page: Page<T>, url: &RequestUrl) -> Self {
        let links = PageLinks {
            current: url.page_link(page.number),
            first: url.page_link(1),
            last: url.page_link(page.num_pages),
            next: page.has_next().then(|| url.page_link(page.number + 1)),
            previous: page.has_previous().then(|| url.page_link(page.number - 1)),
        };
        let paging = Paging {
            links,
            page: page.number,
            pages: page.num_pages,
            size: page.items.len() as u64,
        };
        Self {
            paging,
            data: page.items,
            meta: Meta { count: page.count },
        }
    }
}
