use std::collections::BTreeMap;
use std::convert::Infallible;
use std::num::IntErrorKind;

use axum::{async_trait, extract::FromRequestParts, extract::Query, http::request::Parts};
use utoipa::IntoParams;

/// 정렬 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// 정확히 `asc` 또는 `desc`일 때만 해당 방향, 그 외에는 오름차순
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// 목록 조회 파라미터 (필터/검색/정렬/페이지)
///
/// 쿼리 스트링 형식:
/// `filter[name]=홍길동&search=kim&sortBy=name&sortOrder=desc&pageSize=10&page=2`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub filters: BTreeMap<String, String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page_size: Option<u64>,
    pub page: Option<u64>,
}

impl ListParams {
    /// 디코딩된 쿼리 파라미터 쌍으로부터 생성합니다.
    ///
    /// 알 수 없는 키는 무시하고, 숫자가 아니거나 0인 `pageSize`는 지정되지 않은 것으로 봅니다.
    /// `pageSize`와 `page`는 최대 [`MAX_PAGE_VALUE`]로 제한됩니다.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = ListParams::default();

        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.into();

            if let Some(field) = key
                .strip_prefix("filter[")
                .and_then(|rest| rest.strip_suffix(']'))
            {
                params.filters.insert(field.to_string(), value);
                continue;
            }

            match key {
                "search" => params.search = Some(value),
                "sortBy" => params.sort_by = Some(value),
                "sortOrder" => params.sort_order = Some(value),
                "pageSize" => params.page_size = parse_positive(&value),
                "page" => params.page = parse_positive(&value),
                _ => {}
            }
        }

        params
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>, sort_order: Option<&str>) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = sort_order.map(str::to_string);
        self
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size.min(MAX_PAGE_VALUE)).filter(|n| *n > 0);
        self
    }

    pub fn with_page(mut self, page: u64) -> Self {
        self.page = Some(page.min(MAX_PAGE_VALUE)).filter(|n| *n > 0);
        self
    }
}

/// 목록 조회 쿼리 파라미터 (Swagger 문서용)
///
/// 필드 필터는 `filter[필드명]=값` 형식으로 전달합니다.
#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListQuery {
    /// 허용 필드 전체에 대한 부분 일치 검색 (대소문자 무시)
    pub search: Option<String>,
    /// 정렬 필드
    pub sort_by: Option<String>,
    /// asc | desc (기본값 asc)
    pub sort_order: Option<String>,
    /// 페이지 크기 (지정하지 않으면 전체 목록)
    pub page_size: Option<u64>,
    /// 페이지 번호 (기본값 1)
    pub page: Option<u64>,
}

/// `pageSize`/`page` 상한 (DB의 LIMIT/OFFSET은 부호 있는 64비트)
pub const MAX_PAGE_VALUE: u64 = i64::MAX as u64;

/// 양의 정수만 인정하며, 상한을 넘는 숫자는 상한으로 맞춥니다.
fn parse_positive(raw: &str) -> Option<u64> {
    let value = match raw.trim().parse::<u64>() {
        Ok(n) => n,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => MAX_PAGE_VALUE,
        Err(_) => return None,
    };

    Some(value.min(MAX_PAGE_VALUE)).filter(|n| *n > 0)
}

/// 쿼리 스트링에서 ListParams를 추출하는 Extractor
///
/// 형식이 잘못된 쿼리 스트링도 요청을 거부하지 않고 기본값으로 처리합니다.
#[async_trait]
impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();

        Ok(ListParams::from_pairs(pairs))
    }
}
