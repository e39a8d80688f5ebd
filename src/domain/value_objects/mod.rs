//! Value Objects
//!
//! Immutable value types used across the domain.

mod gender;
mod person_filter;
mod sort_order;

pub use gender::GenderOptions;
pub use person_filter::{PersonFilter, PersonSearchField, SEARCH_DATE_FORMAT};
pub use sort_order::{PersonSortField, SortOrderOptions};
