//! Paging and sorting primitives.
//!
//! # Invariants
//! - `PageRequest::size` is always at least 1.
//! - `Page::total_pages` is `ceil(total_elements / size)`; an empty result has
//!   zero pages but still reports page `0` as first.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Sort direction for one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub property: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

/// Ordered list of sort keys. Empty means "unsorted".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Sorts by every property in `properties` using the same direction.
    pub fn by(direction: Direction, properties: &[&str]) -> Self {
        Self {
            orders: properties
                .iter()
                .map(|property| Order {
                    property: (*property).to_string(),
                    direction,
                })
                .collect(),
        }
    }

    /// Appends `order` as the next tiebreaker.
    pub fn and(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Invalid paging input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    InvalidSize(u32),
}

impl Display for PageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSize(size) => write!(f, "page size must be at least 1, got {size}"),
        }
    }
}

impl Error for PageError {}

/// Zero-based page index plus page size and sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: Sort,
}

impl PageRequest {
    pub fn of(page: u32, size: u32) -> Result<Self, PageError> {
        Self::of_sorted(page, size, Sort::unsorted())
    }

    pub fn of_sorted(page: u32, size: u32, sort: Sort) -> Result<Self, PageError> {
        if size == 0 {
            return Err(PageError::InvalidSize(size));
        }
        Ok(Self { page, size, sort })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Request for the following page with the same size and sort.
    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            size: self.size,
            sort: self.sort.clone(),
        }
    }
}

/// One page of results plus the total row count of the whole query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    content: Vec<T>,
    number: u32,
    size: u32,
    total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Zero-based page index.
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.number) + 1 < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    /// Converts the content while keeping paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Order, Page, PageError, PageRequest, Sort};

    #[test]
    fn page_request_rejects_zero_size() {
        assert_eq!(PageRequest::of(0, 0), Err(PageError::InvalidSize(0)));
    }

    #[test]
    fn offset_multiplies_page_and_size() {
        let request = PageRequest::of(3, 20).unwrap();
        assert_eq!(request.offset(), 60);
        assert_eq!(request.next().offset(), 80);
    }

    #[test]
    fn first_page_of_five_with_size_three() {
        let request = PageRequest::of(0, 3).unwrap();
        let page = Page::new(vec![1, 2, 3], &request, 5);

        assert_eq!(page.total_pages(), 2);
        assert!(page.is_first());
        assert!(page.has_next());
        assert!(!page.has_previous());
        assert!(!page.is_last());
    }

    #[test]
    fn last_page_has_no_next() {
        let request = PageRequest::of(1, 3).unwrap();
        let page = Page::new(vec![4, 5], &request, 5);

        assert!(page.is_last());
        assert!(page.has_previous());
        assert_eq!(page.number_of_elements(), 2);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let request = PageRequest::of(0, 10).unwrap();
        let page: Page<u8> = Page::new(Vec::new(), &request, 0);

        assert_eq!(page.total_pages(), 0);
        assert!(page.is_first());
        assert!(page.is_last());
    }

    #[test]
    fn map_keeps_metadata() {
        let request = PageRequest::of(0, 2).unwrap();
        let page = Page::new(vec![1, 2], &request, 7).map(|value| value * 10);

        assert_eq!(page.content(), &[10, 20]);
        assert_eq!(page.total_elements(), 7);
        assert_eq!(page.total_pages(), 4);
    }

    #[test]
    fn sort_by_then_and_preserves_order() {
        let sort = Sort::by(Direction::Desc, &["age"]).and(Order::asc("username"));
        let properties: Vec<_> = sort
            .orders()
            .iter()
            .map(|order| (order.property.as_str(), order.direction))
            .collect();

        assert_eq!(
            properties,
            vec![("age", Direction::Desc), ("username", Direction::Asc)]
        );
        assert!(Sort::unsorted().is_unsorted());
    }
}
