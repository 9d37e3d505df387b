pub mod config;
pub mod domain;
pub mod global;
pub mod shutdown;
pub mod state;
pub mod utils;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::{association, auth, health, student, team};
use crate::global::middleware::request_id_middleware;
pub use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::health::handler::health_check,
        domain::auth::handler::register,
        domain::auth::handler::login,
        domain::auth::handler::logout,
        domain::auth::handler::me,
        domain::student::handler::list_students,
        domain::student::handler::create_student,
        domain::student::handler::get_student,
        domain::student::handler::update_student,
        domain::student::handler::delete_student,
        domain::team::handler::list_teams,
        domain::team::handler::create_team,
        domain::team::handler::get_team,
        domain::team::handler::update_team,
        domain::team::handler::delete_team,
        domain::association::handler::list_team_students,
        domain::association::handler::add_student_to_team,
        domain::association::handler::remove_student_from_team,
    ),
    components(
        schemas(
            domain::health::dto::HealthReport,
            domain::health::dto::HealthState,
            domain::health::dto::DatabaseCheck,
            domain::auth::dto::RegisterRequest,
            domain::auth::dto::LoginRequest,
            domain::auth::dto::UserResponse,
            domain::auth::dto::AuthResponse,
            domain::auth::dto::SuccessAuthResponse,
            domain::auth::dto::SuccessUserResponse,
            domain::student::dto::CreateStudentRequest,
            domain::student::dto::UpdateStudentRequest,
            domain::student::dto::StudentResponse,
            domain::student::dto::SuccessStudentResponse,
            domain::student::dto::SuccessStudentListResponse,
            domain::team::dto::CreateTeamRequest,
            domain::team::dto::UpdateTeamRequest,
            domain::team::dto::TeamResponse,
            domain::team::dto::SuccessTeamResponse,
            domain::team::dto::SuccessTeamListResponse,
            domain::association::dto::AddStudentToTeamRequest,
            domain::association::dto::AssociationResponse,
            domain::association::dto::SuccessAssociationResponse,
            utils::response::PageMeta,
            utils::response::PageLinks,
            utils::response::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "헬스체크"),
        (name = "Auth", description = "회원가입/로그인"),
        (name = "Student", description = "학생 관리 API"),
        (name = "Team", description = "팀 관리 API"),
        (name = "TeamStudent", description = "팀 소속 학생 관리 API")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// 인증이 필요한 `/api` 하위 라우트
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::handler::register))
        .route("/login", post(auth::handler::login))
        .route("/logout", post(auth::handler::logout))
        .route("/me", get(auth::handler::me))
        .route(
            "/students",
            get(student::handler::list_students).post(student::handler::create_student),
        )
        .route(
            "/students/:id",
            get(student::handler::get_student)
                .put(student::handler::update_student)
                .delete(student::handler::delete_student),
        )
        .route(
            "/teams",
            get(team::handler::list_teams).post(team::handler::create_team),
        )
        .route(
            "/teams/:id",
            get(team::handler::get_team)
                .put(team::handler::update_team)
                .delete(team::handler::delete_team),
        )
        .route(
            "/teams/:id/students",
            get(association::handler::list_team_students)
                .post(association::handler::add_student_to_team),
        )
        .route(
            "/teams/:id/students/:student_id",
            axum::routing::delete(association::handler::remove_student_from_team),
        )
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
