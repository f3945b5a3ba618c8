use serde::Serialize;

use crate::error::AppError;

/// Page metadata for list responses.
///
/// `page` is 1-based and clamped to the last page when the caller asks for
/// one past the end, so `offset` always points at existing rows (or 0 when
/// there are none).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub per_page: i64,
    pub page_count: i64,
    pub total_count: i64,
}

impl PageMeta {
    pub fn new(page: i64, limit: i64, total: i64, default_limit: i64) -> Result<Self, AppError> {
        let default_limit = validate_default_limit(default_limit)?;
        let per_page = if limit <= 0 { default_limit } else { limit };
        let total_count = total.max(0);

        let page_count = total_count / per_page + i64::from(total_count % per_page != 0);
        let page = page.min(page_count).max(1);

        Ok(Self {
            page,
            per_page,
            page_count,
            total_count,
        })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// Rejects a non-positive default page size. Run once at startup so a bad
/// configuration never reaches request handling.
pub fn validate_default_limit(default_limit: i64) -> Result<i64, AppError> {
    if default_limit <= 0 {
        return Err(AppError::Config(format!(
            "default page limit must be positive, got {}",
            default_limit
        )));
    }
    Ok(default_limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn second_page_offsets_by_limit() {
        let meta = PageMeta::new(2, 10, 25, 10).unwrap();
        assert_eq!(meta.offset(), 10);
        assert_eq!(meta.limit(), 10);
        assert_eq!(meta.page_count, 3);
    }

    #[test]
    fn zero_limit_uses_default() {
        let meta = PageMeta::new(1, 0, 5, 20).unwrap();
        assert_eq!(meta.offset(), 0);
        assert_eq!(meta.limit(), 20);
    }

    #[test]
    fn negative_inputs_are_normalised() {
        let meta = PageMeta::new(-3, -1, 50, 15).unwrap();
        assert_eq!(meta.page, 1);
        assert_eq!(meta.offset(), 0);
        assert_eq!(meta.limit(), 15);
    }

    #[test]
    fn page_past_end_is_clamped_to_last_page() {
        let meta = PageMeta::new(9, 10, 25, 10).unwrap();
        assert_eq!(meta.page, 3);
        assert_eq!(meta.offset(), 20);
    }

    #[test]
    fn empty_result_stays_on_first_page() {
        let meta = PageMeta::new(4, 10, 0, 10).unwrap();
        assert_eq!(meta.page, 1);
        assert_eq!(meta.page_count, 0);
        assert_eq!(meta.offset(), 0);
    }

    #[test]
    fn huge_limit_fits_everything_on_one_page() {
        let meta = PageMeta::new(1, i64::MAX, 3, 10).unwrap();
        assert_eq!(meta.page_count, 1);
        assert_eq!(meta.offset(), 0);
        assert_eq!(meta.limit(), i64::MAX);
    }

    #[test]
    fn huge_page_and_total_do_not_overflow() {
        let meta = PageMeta::new(i64::MAX, 10, i64::MAX, 10).unwrap();
        assert_eq!(meta.page_count, i64::MAX / 10 + 1);
        assert_eq!(meta.page, meta.page_count);
        assert_eq!(meta.offset(), (meta.page_count - 1) * 10);

        let meta = PageMeta::new(i64::MAX, i64::MAX, i64::MAX, 10).unwrap();
        assert_eq!(meta.page, 1);
        assert_eq!(meta.offset(), 0);
    }

    #[test]
    fn non_positive_default_is_a_config_error() {
        let err = PageMeta::new(1, 10, 5, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(validate_default_limit(-5).is_err());
    }
}
