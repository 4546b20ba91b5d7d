use serde::{Deserialize, Serialize};
use tg_shared::Pagination;

/// `?page=&per_page=` on list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page, self.per_page)
    }
}

/// Body of responses that carry no resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Treat `?field=` the same as an absent parameter
pub(crate) fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults_and_clamps() {
        let pagination = PageQuery::default().pagination();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, 20);

        let pagination = PageQuery {
            page: Some(0),
            per_page: Some(1000),
        }
        .pagination();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, 100);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&Some("  ".to_string())), None);
        assert_eq!(non_empty(&None), None);
        assert_eq!(non_empty(&Some(" roofing ".to_string())), Some("roofing".to_string()));
    }
}
