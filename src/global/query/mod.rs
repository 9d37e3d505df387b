//! 목록 조회 공통 레이어
//!
//! 학생/팀/팀 멤버 목록이 동일한 필터·검색·정렬·페이지네이션 규칙을 공유합니다.

pub mod capability;
pub mod field;
pub mod params;
pub mod result;
pub mod shaper;

pub use capability::{EntityQuery, QueryCapability};
pub use params::{ListParams, SortDirection};
pub use result::ResultSet;
pub use shaper::QueryShaper;
