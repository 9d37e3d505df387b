/// 목록 조회 결과: 전체 목록 또는 페이지
#[derive(Debug, Clone, PartialEq)]
pub enum ResultSet<T> {
    FullList(Vec<T>),
    Page {
        items: Vec<T>,
        /// 1부터 시작하는 현재 페이지
        page: u64,
        page_size: u64,
        total: u64,
        last_page: u64,
    },
}

impl<T> ResultSet<T> {
    /// 조회된 전체 건수와 페이지 크기로 페이지 결과를 생성합니다.
    pub fn page(items: Vec<T>, page: u64, page_size: u64, total: u64) -> Self {
        ResultSet::Page {
            items,
            page,
            page_size,
            total,
            last_page: last_page(total, page_size),
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            ResultSet::FullList(items) => items,
            ResultSet::Page { items, .. } => items,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            ResultSet::FullList(items) => items,
            ResultSet::Page { items, .. } => items,
        }
    }

    pub fn is_paginated(&self) -> bool {
        matches!(self, ResultSet::Page { .. })
    }

    /// 항목 타입 변환 (엔티티 모델 → 응답 DTO)
    pub fn map<U, F>(self, f: F) -> ResultSet<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            ResultSet::FullList(items) => ResultSet::FullList(items.into_iter().map(f).collect()),
            ResultSet::Page {
                items,
                page,
                page_size,
                total,
                last_page,
            } => ResultSet::Page {
                items: items.into_iter().map(f).collect(),
                page,
                page_size,
                total,
                last_page,
            },
        }
    }
}

/// 마지막 페이지 번호 (결과가 없어도 1)
fn last_page(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_compute_last_page() {
        assert_eq!(last_page(10, 5), 2);
        assert_eq!(last_page(11, 5), 3);
        assert_eq!(last_page(0, 5), 1);
        assert_eq!(last_page(3, 10), 1);
    }

    #[test]
    fn map_should_keep_page_metadata() {
        let page = ResultSet::page(vec![1, 2], 2, 2, 5).map(|n| n * 10);

        assert_eq!(
            page,
            ResultSet::Page {
                items: vec![10, 20],
                page: 2,
                page_size: 2,
                total: 5,
                last_page: 3,
            }
        );
    }

    #[test]
    fn items_should_expose_rows_of_both_variants() {
        assert_eq!(ResultSet::FullList(vec![1, 2, 3]).items(), &[1, 2, 3]);
        assert_eq!(ResultSet::page(vec![4], 1, 1, 1).into_items(), vec![4]);
        assert!(!ResultSet::FullList(Vec::<i32>::new()).is_paginated());
    }
}
