//! Pagination and sort types

use super::entity::{EntityMeta, FieldMeta};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: &'static FieldMeta,
    pub direction: SortDirection,
}

/// Requested window: 0-based page index, page size and sort keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    pub fn sorted_by(mut self, field: &'static FieldMeta, direction: SortDirection) -> Self {
        self.sort.push(SortOrder { field, direction });
        self
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// ORDER BY list for `entity`
    ///
    /// The primary key (ascending) is always the final tiebreaker so that
    /// paging is stable.
    pub fn order_by(&self, entity: &EntityMeta) -> String {
        let id = entity.id();
        let mut keys: Vec<String> = self
            .sort
            .iter()
            .map(|s| format!("{} {}", s.field.column, s.direction.as_sql()))
            .collect();

        if !self.sort.iter().any(|s| s.field.name == id.name) {
            keys.push(format!("{} ASC", id.column));
        }
        keys.join(", ")
    }
}

/// One window of results plus the total match count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn empty(request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content: Vec::new(),
            total_elements,
            page: request.page,
            size: request.size,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page: self.page,
            size: self.size,
        }
    }
}
