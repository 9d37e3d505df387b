use std::collections::BTreeMap;

use tracing::debug;

use super::capability::QueryCapability;
use super::field::resolve_field;
use super::params::{ListParams, SortDirection, MAX_PAGE_VALUE};
use super::result::ResultSet;

/// 목록 조회 공통 처리: 필터 → 검색 → 정렬 → 페이지네이션
///
/// 상태를 가지지 않으며, 각 서비스가 조회 쿼리와 허용 필드 목록을 넘겨 위임합니다.
pub struct QueryShaper;

impl QueryShaper {
    pub async fn shape<Q>(
        query: Q,
        fields: &[&str],
        params: &ListParams,
    ) -> Result<ResultSet<Q::Item>, Q::Error>
    where
        Q: QueryCapability,
    {
        let query = Self::filter(query, fields, &params.filters);
        let query = Self::search(query, fields, params.search.as_deref());
        let query = Self::order(
            query,
            fields,
            params.sort_by.as_deref(),
            params.sort_order.as_deref(),
        );

        Self::paginate(query, params.page_size, params.page).await
    }

    /// 허용 필드에 해당하는 키만 동등 조건으로 적용 (빈 값, 알 수 없는 키는 무시)
    pub fn filter<Q: QueryCapability>(
        query: Q,
        fields: &[&str],
        filters: &BTreeMap<String, String>,
    ) -> Q {
        filters.iter().fold(query, |query, (key, value)| {
            if value.is_empty() {
                return query;
            }
            match resolve_field(fields, key) {
                Some(field) => query.where_eq(field, value),
                None => {
                    debug!(key = %key, "Ignoring filter on unknown field");
                    query
                }
            }
        })
    }

    pub fn search<Q: QueryCapability>(query: Q, fields: &[&str], search: Option<&str>) -> Q {
        match search {
            Some(term) if !term.is_empty() && !fields.is_empty() => {
                query.where_any_contains(fields, term)
            }
            _ => query,
        }
    }

    pub fn order<Q: QueryCapability>(
        query: Q,
        fields: &[&str],
        sort_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> Q {
        match sort_by.and_then(|key| resolve_field(fields, key)) {
            Some(field) => query.order_by_field(field, SortDirection::parse(sort_order)),
            None => query,
        }
    }

    pub async fn paginate<Q: QueryCapability>(
        query: Q,
        page_size: Option<u64>,
        page: Option<u64>,
    ) -> Result<ResultSet<Q::Item>, Q::Error> {
        match page_size.filter(|size| *size > 0) {
            Some(page_size) => {
                let page_size = page_size.min(MAX_PAGE_VALUE);
                let page = page.unwrap_or(1).clamp(1, MAX_PAGE_VALUE);
                let (items, total) = query.fetch_page(page, page_size).await?;
                Ok(ResultSet::page(items, page, page_size, total))
            }
            None => Ok(ResultSet::FullList(query.fetch_all().await?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::convert::Infallible;

    type Row = BTreeMap<String, String>;

    /// 메모리 상의 행 목록에 대해 동작하는 QueryCapability
    struct VecQuery {
        rows: Vec<Row>,
    }

    fn column(field: &str) -> &str {
        field.split_once('.').map(|(_, c)| c).unwrap_or(field)
    }

    fn cell<'a>(row: &'a Row, field: &str) -> &'a str {
        row.get(column(field)).map(String::as_str).unwrap_or_default()
    }

    #[async_trait]
    impl QueryCapability for VecQuery {
        type Item = Row;
        type Error = Infallible;

        fn where_eq(mut self, field: &str, value: &str) -> Self {
            self.rows.retain(|row| cell(row, field) == value);
            self
        }

        fn where_any_contains(mut self, fields: &[&str], needle: &str) -> Self {
            let needle = needle.to_lowercase();
            self.rows.retain(|row| {
                fields
                    .iter()
                    .any(|field| cell(row, field).to_lowercase().contains(&needle))
            });
            self
        }

        fn order_by_field(mut self, field: &str, direction: SortDirection) -> Self {
            let field = field.to_string();
            self.rows.sort_by(|a, b| {
                let ordering = cell(a, &field).cmp(cell(b, &field));
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
            self
        }

        async fn fetch_all(self) -> Result<Vec<Row>, Infallible> {
            Ok(self.rows)
        }

        async fn fetch_page(self, page: u64, page_size: u64) -> Result<(Vec<Row>, u64), Infallible> {
            let total = self.rows.len() as u64;
            let items = self
                .rows
                .into_iter()
                .skip(((page - 1) * page_size) as usize)
                .take(page_size as usize)
                .collect();
            Ok((items, total))
        }
    }

    /// 호출된 연산을 기록하고 그 기록을 결과로 돌려주는 QueryCapability
    #[derive(Default)]
    struct RecordingQuery {
        ops: Vec<String>,
    }

    #[async_trait]
    impl QueryCapability for RecordingQuery {
        type Item = String;
        type Error = Infallible;

        fn where_eq(mut self, field: &str, value: &str) -> Self {
            self.ops.push(format!("eq {field}={value}"));
            self
        }

        fn where_any_contains(mut self, fields: &[&str], needle: &str) -> Self {
            self.ops.push(format!("like {}~{needle}", fields.join("|")));
            self
        }

        fn order_by_field(mut self, field: &str, direction: SortDirection) -> Self {
            self.ops.push(format!("order {field} {direction:?}"));
            self
        }

        async fn fetch_all(mut self) -> Result<Vec<String>, Infallible> {
            self.ops.push("all".to_string());
            Ok(self.ops)
        }

        async fn fetch_page(mut self, page: u64, page_size: u64) -> Result<(Vec<String>, u64), Infallible> {
            self.ops.push(format!("page {page}/{page_size}"));
            Ok((self.ops, 0))
        }
    }

    const FIELDS: [&str; 4] = ["name", "email", "cpf", "ra"];

    fn student(i: usize, name: &str) -> Row {
        Row::from([
            ("name".to_string(), name.to_string()),
            ("email".to_string(), format!("student{i}@example.com")),
            ("cpf".to_string(), format!("{:011}", i)),
            ("ra".to_string(), format!("{:07}", 1000 + i)),
        ])
    }

    fn ten_students() -> Vec<Row> {
        let mut rows = vec![student(0, "John Doe")];
        rows.extend((1..10).map(|i| student(i, &format!("Other {i}"))));
        rows
    }

    async fn shape_rows(rows: Vec<Row>, params: &ListParams) -> ResultSet<Row> {
        QueryShaper::shape(VecQuery { rows }, &FIELDS, params)
            .await
            .unwrap()
    }

    async fn shape_ops(fields: &[&str], params: &ListParams) -> Vec<String> {
        QueryShaper::shape(RecordingQuery::default(), fields, params)
            .await
            .unwrap()
            .into_items()
    }

    #[tokio::test]
    async fn should_return_full_list_without_page_size() {
        let result = shape_rows(ten_students(), &ListParams::default()).await;

        assert!(!result.is_paginated());
        assert_eq!(result.items().len(), 10);
    }

    #[tokio::test]
    async fn should_filter_by_exact_name() {
        let params = ListParams::default().with_filter("name", "John Doe");

        let result = shape_rows(ten_students(), &params).await;

        assert_eq!(result.items().len(), 1);
        assert_eq!(result.items()[0]["name"], "John Doe");
    }

    #[tokio::test]
    async fn should_paginate_ten_rows_in_pages_of_five() {
        let params = ListParams::default().with_page_size(5);

        let result = shape_rows(ten_students(), &params).await;

        match result {
            ResultSet::Page {
                items,
                page,
                page_size,
                total,
                last_page,
            } => {
                assert_eq!(items.len(), 5);
                assert_eq!(page, 1);
                assert_eq!(page_size, 5);
                assert_eq!(total, 10);
                assert_eq!(last_page, 2);
            }
            ResultSet::FullList(_) => panic!("expected a page"),
        }
    }

    #[tokio::test]
    async fn should_return_requested_page() {
        let params = ListParams::default()
            .with_sort("ra", Some("asc"))
            .with_page_size(4)
            .with_page(3);

        let result = shape_rows(ten_students(), &params).await;

        let ras: Vec<&str> = result.items().iter().map(|r| r["ra"].as_str()).collect();
        assert_eq!(ras, vec!["0001008", "0001009"]);
    }

    #[tokio::test]
    async fn should_apply_stages_in_order() {
        let params = ListParams::default()
            .with_filter("name", "Ana")
            .with_search("an")
            .with_sort("email", Some("desc"))
            .with_page_size(3);

        let ops = shape_ops(&FIELDS, &params).await;

        assert_eq!(
            ops,
            vec![
                "eq name=Ana",
                "like name|email|cpf|ra~an",
                "order email Desc",
                "page 1/3",
            ]
        );
    }

    #[tokio::test]
    async fn should_clamp_page_bounds_before_fetching() {
        let params = ListParams {
            page_size: Some(u64::MAX),
            page: Some(u64::MAX),
            ..ListParams::default()
        };

        let ops = shape_ops(&FIELDS, &params).await;

        assert_eq!(ops, vec![format!("page {MAX_PAGE_VALUE}/{MAX_PAGE_VALUE}")]);
    }

    #[tokio::test]
    async fn should_ignore_unknown_and_empty_filters() {
        let params = ListParams::default()
            .with_filter("password", "x")
            .with_filter("email", "");

        let ops = shape_ops(&FIELDS, &params).await;

        assert_eq!(ops, vec!["all"]);
    }

    #[tokio::test]
    async fn should_use_qualified_field_for_plain_key() {
        let fields = ["students.name", "students.email"];
        let params = ListParams::default()
            .with_filter("name", "Ana")
            .with_sort("email", None);

        let ops = shape_ops(&fields, &params).await;

        assert_eq!(
            ops,
            vec!["eq students.name=Ana", "order students.email Asc", "all"]
        );
    }

    #[tokio::test]
    async fn should_ignore_unknown_sort_field_and_fall_back_to_asc() {
        let unknown = ListParams::default().with_sort("password", Some("desc"));
        assert_eq!(shape_ops(&FIELDS, &unknown).await, vec!["all"]);

        let upper = ListParams::default().with_sort("name", Some("DESC"));
        assert_eq!(
            shape_ops(&FIELDS, &upper).await,
            vec!["order name Asc", "all"]
        );
    }

    #[tokio::test]
    async fn should_skip_empty_search() {
        let params = ListParams::default().with_search("");

        assert_eq!(shape_ops(&FIELDS, &params).await, vec!["all"]);
    }

    #[tokio::test]
    async fn should_search_case_insensitively_across_fields() {
        let params = ListParams::default().with_search("JOHN");

        let result = shape_rows(ten_students(), &params).await;

        assert_eq!(result.items().len(), 1);

        let by_email = ListParams::default().with_search("STUDENT3@");
        assert_eq!(shape_rows(ten_students(), &by_email).await.items().len(), 1);
    }

    fn arb_rows() -> impl Strategy<Value = Vec<Row>> {
        prop::collection::vec(
            ("[a-cA-C]{0,3}", "[a-c]{1,2}", "[0-2]{1,2}", "[0-2]{1}").prop_map(
                |(name, email, cpf, ra)| {
                    Row::from([
                        ("name".to_string(), name),
                        ("email".to_string(), email),
                        ("cpf".to_string(), cpf),
                        ("ra".to_string(), ra),
                    ])
                },
            ),
            0..30,
        )
    }

    proptest! {
        #[test]
        fn filtered_rows_satisfy_every_equality(
            rows in arb_rows(),
            cpf in "[0-2]{1,2}",
            ra in "[0-2]{1}",
        ) {
            let params = ListParams::default().with_filter("cpf", cpf.clone()).with_filter("ra", ra.clone());
            let expected = rows.iter().filter(|r| r["cpf"] == cpf && r["ra"] == ra).count();

            let result = tokio_test::block_on(shape_rows(rows, &params));

            prop_assert_eq!(result.items().len(), expected);
            for row in result.items() {
                prop_assert_eq!(&row["cpf"], &cpf);
                prop_assert_eq!(&row["ra"], &ra);
            }
        }

        #[test]
        fn search_keeps_exactly_the_matching_rows(rows in arb_rows(), needle in "[a-cA-C0-2]{1,2}") {
            let params = ListParams::default().with_search(needle.clone());
            let lowered = needle.to_lowercase();
            let is_match = |row: &Row| FIELDS.iter().any(|f| row[*f].to_lowercase().contains(&lowered));
            let expected: Vec<Row> = rows.iter().filter(|r| is_match(r)).cloned().collect();

            let result = tokio_test::block_on(shape_rows(rows, &params));

            prop_assert_eq!(result.into_items(), expected);
        }

        #[test]
        fn sorting_is_stable_and_ordered(rows in arb_rows(), desc in any::<bool>()) {
            let order = if desc { "desc" } else { "asc" };
            let params = ListParams::default().with_sort("ra", Some(order));
            let mut expected = rows.clone();
            expected.sort_by(|a, b| {
                let ordering = a["ra"].cmp(&b["ra"]);
                if desc { ordering.reverse() } else { ordering }
            });

            let result = tokio_test::block_on(shape_rows(rows, &params));

            prop_assert_eq!(result.into_items(), expected);
        }

        #[test]
        fn pages_partition_the_full_result(rows in arb_rows(), page_size in 1u64..8) {
            let full = tokio_test::block_on(shape_rows(rows.clone(), &ListParams::default())).into_items();
            let mut collected = Vec::new();
            let mut page = 1;
            loop {
                let params = ListParams::default().with_page_size(page_size).with_page(page);
                let result = tokio_test::block_on(shape_rows(rows.clone(), &params));
                let ResultSet::Page { items, total, last_page, .. } = result else {
                    return Err(TestCaseError::fail("expected a page"));
                };
                prop_assert_eq!(total, rows.len() as u64);
                collected.extend(items);
                if page >= last_page {
                    break;
                }
                page += 1;
            }
            prop_assert_eq!(collected, full);
        }
    }
}
