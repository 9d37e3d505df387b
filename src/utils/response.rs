use axum::http::Uri;
use serde::Serialize;
use utoipa::ToSchema;

use crate::global::query::ResultSet;

/// API 명세에 맞는 기본 응답 구조체
///
/// 형식:
/// ```json
/// {
///   "isSuccess": true,
///   "code": "COMMON200",
///   "message": "성공입니다.",
///   "result": { ... }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse<T: Serialize> {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Option<T>,
}

impl<T: Serialize> BaseResponse<T> {
    /// 성공 응답 생성
    pub fn success(result: T) -> Self {
        Self::success_with_message(result, "성공입니다.")
    }

    /// 메시지를 지정한 성공 응답 생성
    pub fn success_with_message(result: T, message: impl Into<String>) -> Self {
        Self {
            is_success: true,
            code: "COMMON200".to_string(),
            message: message.into(),
            result: Some(result),
        }
    }

    /// 리소스 생성 응답 (201)
    pub fn created(result: T) -> Self {
        Self {
            is_success: true,
            code: "COMMON201".to_string(),
            message: "생성되었습니다.".to_string(),
            result: Some(result),
        }
    }
}

/// 에러 응답 구조체
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Option<()>,
}

impl ErrorResponse {
    /// 에러 응답 생성
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            code: code.into(),
            message: message.into(),
            result: None,
        }
    }
}

/// 목록 조회 결과
///
/// `pageSize`가 없으면 배열 그대로, 있으면 `data`/`meta`/`links` 구조로 직렬화됩니다.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ListResponse<T: Serialize> {
    List(Vec<T>),
    Page(PageResponse<T>),
}

#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub meta: PageMeta,
    pub links: PageLinks,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PageLinks {
    pub first: String,
    pub last: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

impl<T: Serialize> ListResponse<T> {
    /// 조회 결과를 응답 형태로 변환합니다.
    ///
    /// 페이지 링크는 요청 URI의 경로와 쿼리 스트링을 유지한 채 `page` 값만 교체합니다.
    pub fn from_result(result: ResultSet<T>, uri: &Uri) -> Self {
        match result {
            ResultSet::FullList(items) => ListResponse::List(items),
            ResultSet::Page {
                items,
                page,
                page_size,
                total,
                last_page,
            } => ListResponse::Page(PageResponse {
                data: items,
                meta: PageMeta {
                    current_page: page,
                    last_page,
                    per_page: page_size,
                    total,
                    total_pages: last_page,
                },
                links: PageLinks {
                    first: page_url(uri, 1),
                    last: page_url(uri, last_page),
                    prev: (page > 1).then(|| page_url(uri, page - 1)),
                    next: (page < last_page).then(|| page_url(uri, page + 1)),
                },
            }),
        }
    }
}

/// 기존 쿼리 파라미터는 인코딩된 그대로 두고 `page`만 교체한 URL
fn page_url(uri: &Uri, page: u64) -> String {
    let mut segments: Vec<&str> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|s| !s.is_empty() && *s != "page" && !s.starts_with("page="))
        .collect();

    let page_segment = format!("page={}", page);
    segments.push(&page_segment);

    format!("{}?{}", uri.path(), segments.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: u64, last_page: u64) -> ResultSet<i32> {
        ResultSet::Page {
            items: vec![1, 2],
            page,
            page_size: 2,
            total: last_page * 2,
            last_page,
        }
    }

    #[test]
    fn should_serialize_full_list_as_plain_array() {
        let uri: Uri = "/api/students".parse().unwrap();
        let response = ListResponse::from_result(ResultSet::FullList(vec![1, 2, 3]), &uri);

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json, serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn should_keep_other_query_params_in_links() {
        let uri: Uri = "/api/students?pageSize=2&search=ana&page=2".parse().unwrap();
        let response = ListResponse::from_result(page(2, 3), &uri);

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json["links"]["first"],
            "/api/students?pageSize=2&search=ana&page=1"
        );
        assert_eq!(json["links"]["last"], "/api/students?pageSize=2&search=ana&page=3");
        assert_eq!(json["links"]["prev"], "/api/students?pageSize=2&search=ana&page=1");
        assert_eq!(json["links"]["next"], "/api/students?pageSize=2&search=ana&page=3");
        assert_eq!(json["meta"]["currentPage"], 2);
        assert_eq!(json["meta"]["lastPage"], 3);
        assert_eq!(json["meta"]["perPage"], 2);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }

    #[test]
    fn should_omit_prev_on_first_and_next_on_last_page() {
        let uri: Uri = "/api/teams?pageSize=2".parse().unwrap();

        let first = serde_json::to_value(ListResponse::from_result(page(1, 1), &uri)).unwrap();

        assert!(first["links"]["prev"].is_null());
        assert!(first["links"]["next"].is_null());
        assert_eq!(first["links"]["first"], "/api/teams?pageSize=2&page=1");
    }
}
