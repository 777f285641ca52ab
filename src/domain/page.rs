use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Default number of rows requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// One page of a resource listing.
///
/// Backend iterations disagree on the envelope: newer ones emit `totalItems`,
/// older ones `totalElements`, and one emits Go's capitalised field names.
/// All of them decode into this shape, and a `null` item list decodes as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default, alias = "Items", deserialize_with = "null_as_default")]
    pub items: Vec<T>,
    #[serde(default, alias = "totalElements", alias = "TotalElements")]
    pub total_items: u64,
    #[serde(default, alias = "TotalPages")]
    pub total_pages: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_pages: 0,
        }
    }
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Zero-based page index and page size, as driven by a paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub index: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(index: u32, size: u32) -> Self {
        Self { index, size }
    }

    pub fn first(size: u32) -> Self {
        Self { index: 0, size }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort key plus direction for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K> Sort<K> {
    pub fn asc(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_accepts_total_items() {
        let page: Page<u32> =
            serde_json::from_str(r#"{"items":[1,2],"totalItems":12,"totalPages":6}"#).unwrap();
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.total_items, 12);
        assert_eq!(page.total_pages, 6);
    }

    #[test]
    fn test_page_accepts_total_elements_and_null_items() {
        let page: Page<u32> =
            serde_json::from_str(r#"{"items":null,"totalElements":0,"totalPages":0}"#).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 0);
    }

    #[test]
    fn test_page_accepts_capitalised_envelope() {
        let page: Page<u32> =
            serde_json::from_str(r#"{"Items":[7],"TotalElements":1,"TotalPages":1}"#).unwrap();
        assert_eq!(page.items, vec![7]);
        assert_eq!(page.total_items, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_default_page_request() {
        assert_eq!(PageRequest::default(), PageRequest::new(0, 50));
    }
}
