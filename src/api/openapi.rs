//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, auth, books, branches, health, translations};

/// Registers the JWT bearer scheme referenced by protected paths
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

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelfmark API",
        version = "0.1.0",
        description = "Library catalog REST API with cached on-demand translation",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        // Translation
        translations::translate,
        translations::set_preference,
        translations::get_preference,
        translations::list_languages,
        // Books
        books::list_books,
        books::get_book,
        books::list_reviews,
        books::create_review,
        books::update_review,
        books::delete_review,
        // Branches
        branches::list_branches,
        branches::book_branches,
        // Admin
        admin::create_book,
        admin::update_book,
        admin::delete_book,
        admin::create_branch,
        admin::set_stock,
        admin::list_cached_translations,
        admin::list_preferences,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::user::User,
            crate::models::user::Role,
            crate::models::user::RegisterUser,
            // Translation
            translations::TranslateRequest,
            translations::TranslateResponse,
            translations::SetPreferenceRequest,
            translations::PreferenceResponse,
            translations::LanguageInfo,
            crate::models::enums::Language,
            crate::models::translation::CachedTranslationSummary,
            crate::models::translation::LanguagePreference,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            books::TranslatedBook,
            books::BookDetails,
            crate::models::review::Review,
            crate::models::review::CreateReview,
            crate::models::review::UpdateReview,
            // Branches
            crate::models::branch::BranchInfo,
            crate::models::branch::BranchStockInfo,
            crate::models::branch::CreateBranch,
            crate::models::branch::Stock,
            crate::models::branch::SetStock,
            branches::BranchListResponse,
            branches::BookBranchesResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and login"),
        (name = "translations", description = "Text translation and language preference"),
        (name = "books", description = "Catalog browsing"),
        (name = "reviews", description = "Book reviews"),
        (name = "branches", description = "Branch locations and stock"),
        (name = "admin", description = "Catalog and cache administration")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
