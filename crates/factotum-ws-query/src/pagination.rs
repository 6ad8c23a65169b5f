// SPDX-License-Identifier: Apache-2.0

use crate::query_error::QueryError;

pub const INVALID_PAGE: &str = "Invalid page.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelector {
    Number(u64),
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub selector: PageSelector,
    pub size: u64,
}

impl PageRequest {
    #[must_use]
    pub fn first(size: u64) -> Self {
        Self {
            selector: PageSelector::Number(1),
            size: size.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub num_pages: u64,
    pub offset: u64,
    pub limit: u64,
}

/// One page of rows plus the bookkeeping the response envelope needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
        }
    }
}

/// An empty result still has one (empty) page.
#[must_use]
pub fn num_pages(count: u64, size: u64) -> u64 {
    let size = size.max(1);
    if count == 0 {
        1
    } else {
        count.div_ceil(size)
    }
}

pub fn resolve_page(count: u64, req: &PageRequest) -> Result<PageWindow, QueryError> {
    let size = req.size.max(1);
    let pages = num_pages(count, size);
    let number = match req.selector {
        PageSelector::Last => pages,
        PageSelector::Number(n) if (1..=pages).contains(&n) => n,
        PageSelector::Number(_) => return Err(QueryError::not_found(INVALID_PAGE)),
    };
    Ok(PageWindow {
        number,
        num_pages: pages,
        offset: (number - 1).saturating_mul(size),
        limit: size,
    })
}
