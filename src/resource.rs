use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{PageRequest, Sort};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// A column a listing can be filtered on.
pub trait FilterField: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Query parameter name, e.g. `name` or `customerPhone`.
    fn param(self) -> &'static str;
}

/// A column a listing can be sorted by.
pub trait SortKey: Copy + Debug + PartialEq + Send + Sync + 'static {
    fn param(self) -> &'static str;
}

/// Trait that any REST collection must implement to be driven by the list and
/// form controllers.
pub trait Resource: Send + Sync + 'static {
    /// Problem-code prefix and label used in notices (`customer`, `order`).
    const NAME: &'static str;
    /// Collection path, e.g. `/api/customers`.
    const PATH: &'static str;

    type Item: DeserializeOwned + Clone + Debug + Send + Sync + 'static;
    type Payload: Serialize + Debug + Send + Sync;
    type Filter: FilterField;
    type Sort: SortKey;

    fn id(item: &Self::Item) -> &str;

    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}

// =============================================================================
// 2. PAGE QUERIES
// =============================================================================

/// Everything a list needs to ask for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery<F, S> {
    pub page: PageRequest,
    pub filter: Option<(F, String)>,
    pub sort: Option<Sort<S>>,
}

pub type QueryOf<R> = PageQuery<<R as Resource>::Filter, <R as Resource>::Sort>;

impl<F: FilterField, S: SortKey> PageQuery<F, S> {
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            filter: None,
            sort: None,
        }
    }

    pub fn with_filter(mut self, field: F, value: impl Into<String>) -> Self {
        self.filter = Some((field, value.into()));
        self
    }

    pub fn with_sort(mut self, sort: Sort<S>) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Query parameters in wire order: `page`, `size`, the filter, `sort`.
    /// A blank filter value is left out.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.index.to_string()),
            ("size".to_string(), self.page.size.to_string()),
        ];
        if let Some((field, value)) = &self.filter {
            let value = value.trim();
            if !value.is_empty() {
                params.push((field.param().to_string(), value.to_string()));
            }
        }
        if let Some(sort) = &self.sort {
            params.push((
                "sort".to_string(),
                format!("{},{}", sort.key.param(), sort.direction.as_str()),
            ));
        }
        params
    }
}

impl<F: FilterField, S: SortKey> Default for PageQuery<F, S> {
    fn default() -> Self {
        Self::new(PageRequest::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Field {
        Name,
    }

    impl FilterField for Field {
        fn param(self) -> &'static str {
            "name"
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Key {
        Id,
    }

    impl SortKey for Key {
        fn param(self) -> &'static str {
            "id"
        }
    }

    #[test]
    fn test_params_in_wire_order() {
        let query = PageQuery::<Field, Key>::default()
            .with_filter(Field::Name, "  Ana ")
            .with_sort(Sort::desc(Key::Id));
        let params = query.to_params();
        let rendered: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        assert_eq!(rendered, vec!["page=0", "size=50", "name=Ana", "sort=id,desc"]);
    }

    #[test]
    fn test_blank_filter_is_omitted() {
        let query = PageQuery::<Field, Key>::new(PageRequest::new(2, 10)).with_filter(Field::Name, "   ");
        assert_eq!(query.to_params().len(), 2);
    }
}
