use async_trait::async_trait;
use sea_orm::{
    sea_query::{Alias, Condition, Expr, Func, LikeExpr, SimpleExpr},
    DatabaseConnection, DbErr, EntityTrait, Iterable, Order, PaginatorTrait,
    PrimaryKeyToColumn, QueryFilter, QueryOrder, QuerySelect, Select,
};

use super::field::split_qualified;
use super::params::SortDirection;

/// 목록 조회에 필요한 저장소 기능 집합
///
/// QueryShaper는 이 트레이트에만 의존하며 특정 DB 엔진을 알지 못합니다.
/// `field`는 항상 허용 필드 목록의 항목(`name` 또는 `table.name`)입니다.
#[async_trait]
pub trait QueryCapability: Sized + Send {
    type Item: Send;
    type Error: Send;

    /// `field = value` 조건 추가 (AND)
    fn where_eq(self, field: &str, value: &str) -> Self;

    /// 필드 중 하나라도 `needle`을 대소문자 구분 없이 포함하는 행만 남김 (OR)
    fn where_any_contains(self, fields: &[&str], needle: &str) -> Self;

    fn order_by_field(self, field: &str, direction: SortDirection) -> Self;

    async fn fetch_all(self) -> Result<Vec<Self::Item>, Self::Error>;

    /// `page`는 1부터 시작하며, (해당 페이지 항목, 전체 건수)를 반환
    async fn fetch_page(
        self,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Self::Item>, u64), Self::Error>;
}

/// sea-orm `Select` 기반 QueryCapability 구현
pub struct EntityQuery<'db, E: EntityTrait> {
    select: Select<E>,
    db: &'db DatabaseConnection,
}

impl<'db, E: EntityTrait> EntityQuery<'db, E> {
    pub fn new(select: Select<E>, db: &'db DatabaseConnection) -> Self {
        Self { select, db }
    }

    fn map_select(self, f: impl FnOnce(Select<E>) -> Select<E>) -> Self {
        Self {
            select: f(self.select),
            db: self.db,
        }
    }

    /// 지정된 정렬 뒤에 기본 키 오름차순을 덧붙여 동순위 행의 순서를 고정합니다.
    fn with_key_order(&self) -> Select<E> {
        E::PrimaryKey::iter().fold(self.select.clone(), |select, key| {
            select.order_by(key.into_column(), Order::Asc)
        })
    }
}

/// 허용 필드 항목을 컬럼 표현식으로 변환 (`table.column` 지원)
fn column_expr(field: &str) -> Expr {
    match split_qualified(field) {
        (Some(table), column) => Expr::col((Alias::new(table), Alias::new(column))),
        (None, column) => Expr::col(Alias::new(column)),
    }
}

/// LIKE 이스케이프 문자 (백엔드별 문자열 리터럴 이스케이프 규칙의 영향을 받지 않음)
const LIKE_ESCAPE: char = '!';

/// LIKE 와일드카드를 이스케이프하여 검색어를 그대로 포함하는 패턴 생성
fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// 1부터 시작하는 페이지의 OFFSET. DB가 받을 수 없는 값이면 `None`.
fn page_offset(page: u64, page_size: u64) -> Option<u64> {
    page.saturating_sub(1)
        .checked_mul(page_size)
        .filter(|offset| *offset <= i64::MAX as u64)
}

#[async_trait]
impl<'db, E> QueryCapability for EntityQuery<'db, E>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
{
    type Item = E::Model;
    type Error = DbErr;

    fn where_eq(self, field: &str, value: &str) -> Self {
        let condition = column_expr(field).eq(value.to_string());
        self.map_select(|select| select.filter(condition))
    }

    fn where_any_contains(self, fields: &[&str], needle: &str) -> Self {
        let pattern = contains_pattern(needle);
        let condition = fields.iter().fold(Condition::any(), |any, field| {
            any.add(
                Expr::expr(Func::lower(column_expr(field)))
                    .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
            )
        });
        self.map_select(|select| select.filter(condition))
    }

    fn order_by_field(self, field: &str, direction: SortDirection) -> Self {
        let order = match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        let expr = SimpleExpr::from(column_expr(field));
        self.map_select(|select| select.order_by(expr, order))
    }

    async fn fetch_all(self) -> Result<Vec<Self::Item>, Self::Error> {
        self.with_key_order().all(self.db).await
    }

    async fn fetch_page(
        self,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Self::Item>, u64), Self::Error> {
        let total = self.select.clone().count(self.db).await?;

        let Some(offset) = page_offset(page, page_size).filter(|offset| *offset < total) else {
            return Ok((Vec::new(), total));
        };

        let items = self
            .with_key_order()
            .offset(offset)
            .limit(page_size.min(i64::MAX as u64))
            .all(self.db)
            .await?;

        Ok((items, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_escape_like_wildcards() {
        assert_eq!(contains_pattern("Doe"), "%doe%");
        assert_eq!(contains_pattern("50%_off"), "%50!%!_off%");
        assert_eq!(contains_pattern("hi!"), "%hi!!%");
        assert_eq!(contains_pattern("a\\b"), "%a\\b%");
    }

    #[test]
    fn should_reject_unrepresentable_offsets() {
        assert_eq!(page_offset(1, 5), Some(0));
        assert_eq!(page_offset(3, 5), Some(10));
        assert_eq!(page_offset(i64::MAX as u64, 5), None);
        assert_eq!(page_offset(2, i64::MAX as u64), Some(i64::MAX as u64));
        assert_eq!(page_offset(3, i64::MAX as u64), None);
    }
}
