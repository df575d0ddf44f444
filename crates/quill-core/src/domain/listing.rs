//! Sort configuration for post listings.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::Post;
use crate::error::ValidationError;

/// Field a listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    Author,
}

impl SortField {
    /// Document key of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
            SortField::Title => "title",
            SortField::Author => "author",
        }
    }

    /// Ascending comparison of two posts on this field.
    /// A missing author sorts before any present one.
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        match self {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortField::Title => a.title.cmp(&b.title),
            SortField::Author => a.author.cmp(&b.author),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" | "created_at" => Ok(SortField::CreatedAt),
            "updatedAt" | "updated_at" => Ok(SortField::UpdatedAt),
            "title" => Ok(SortField::Title),
            "author" => Ok(SortField::Author),
            other => Err(ValidationError::invalid(
                "sortBy",
                format!("cannot sort by `{other}`"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    /// Direction as the document store spells it.
    pub fn as_i32(&self) -> i32 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "1" => Ok(SortOrder::Ascending),
            "desc" | "descending" | "-1" => Ok(SortOrder::Descending),
            _ => Err(ValidationError::invalid(
                "sortOrder",
                format!("unknown sort order `{s}`"),
            )),
        }
    }
}

/// Options for listing every post. Defaults to newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl ListOptions {
    pub fn new(sort_by: SortField, sort_order: SortOrder) -> Self {
        Self {
            sort_by,
            sort_order,
        }
    }

    /// Parse optional raw query values, falling back to the defaults.
    pub fn parse(sort_by: Option<&str>, sort_order: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            sort_by: sort_by.map(str::parse).transpose()?.unwrap_or_default(),
            sort_order: sort_order.map(str::parse).transpose()?.unwrap_or_default(),
        })
    }

    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        let ord = self.sort_by.compare(a, b);
        match self.sort_order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    }
}
