//! Pagination metadata derived from a list query's total-record count.

use serde::Serialize;

/// Read-only descriptor of a paged result set's position within the total.
///
/// Serialized alongside the result rows. When `total_records` is zero there
/// are no pages, and every field is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub current_page: i64,
    pub page_size: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub total_records: i64,
}

impl Metadata {
    /// Derive metadata for a page of a `total_records`-row result set.
    ///
    /// `last_page` is the integer ceiling of `total_records / page_size`.
    pub fn derive(total_records: i64, page: i64, page_size: i64) -> Self {
        if total_records == 0 {
            return Self::default();
        }

        Self {
            current_page: page,
            page_size,
            first_page: 1,
            last_page: (total_records + page_size - 1) / page_size,
            total_records,
        }
    }

    /// True when the metadata describes an empty result set.
    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_set_is_all_zero() {
        assert_eq!(Metadata::derive(0, 3, 20), Metadata::default());
        assert!(Metadata::derive(0, 3, 20).is_empty());
    }

    #[test]
    fn test_last_page_is_ceiling() {
        assert_eq!(Metadata::derive(25, 2, 10).last_page, 3);
        assert_eq!(Metadata::derive(20, 1, 10).last_page, 2);
        assert_eq!(Metadata::derive(1, 1, 100).last_page, 1);
        assert_eq!(Metadata::derive(101, 1, 100).last_page, 2);
    }

    #[test]
    fn test_last_page_bounds_the_total() {
        for (total, page_size) in [(25i64, 10i64), (1, 1), (99, 7), (100, 100)] {
            let m = Metadata::derive(total, 1, page_size);
            assert!(m.last_page * page_size >= total);
            assert!((m.last_page - 1) * page_size < total);
        }
    }

    #[test]
    fn test_page_two_of_twenty_five() {
        let m = Metadata::derive(25, 2, 10);
        assert_eq!(
            m,
            Metadata {
                current_page: 2,
                page_size: 10,
                first_page: 1,
                last_page: 3,
                total_records: 25,
            }
        );
    }

    #[test]
    fn test_serializes_snake_case() {
        let m = Metadata::derive(25, 2, 10);
        let json = serde_json::to_value(m).unwrap();
        assert_eq!(json["current_page"], 2);
        assert_eq!(json["last_page"], 3);
        assert_eq!(json["total_records"], 25);
    }
}
