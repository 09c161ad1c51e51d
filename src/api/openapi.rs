//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, authors, book_instances, books, catalog, genres, health, languages};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Local Library API",
        version = "0.1.0",
        description = "Library catalog browsing and administration REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Catalog
        catalog::index,
        catalog::list_books,
        catalog::get_book,
        catalog::list_authors,
        catalog::get_author,
        // Admin: genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        // Admin: languages
        languages::list_languages,
        languages::get_language,
        languages::create_language,
        languages::update_language,
        languages::delete_language,
        // Admin: authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Admin: books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Admin: book instances
        book_instances::list_book_instances,
        book_instances::get_book_instance,
        book_instances::create_book_instance,
        book_instances::update_book_instance,
        book_instances::delete_book_instance,
        // Admin: layouts and choices
        admin::get_layout,
        admin::list_borrowers,
    ),
    components(
        schemas(
            // Catalog
            crate::services::catalog::SummaryCounts,
            crate::models::genre::Genre,
            crate::models::genre::GenreForm,
            crate::models::language::Language,
            crate::models::language::LanguageForm,
            crate::models::author::Author,
            crate::models::author::AuthorDetail,
            crate::models::author::AuthorAdminRow,
            crate::models::author::AuthorForm,
            crate::models::author::AuthorSave,
            crate::models::book::Book,
            crate::models::book::BookDetail,
            crate::models::book::BookListItem,
            crate::models::book::BookAdminRow,
            crate::models::book::BookForm,
            crate::models::book::InlineBook,
            crate::models::book::BookSave,
            crate::models::book_instance::BookInstance,
            crate::models::book_instance::BookInstanceAdminRow,
            crate::models::book_instance::BookInstanceForm,
            crate::models::book_instance::InlineBookInstance,
            crate::models::enums::LoanStatus,
            crate::models::enums::DueBackFilter,
            crate::models::user::UserShort,
            // Admin layout
            crate::models::admin::ModelAdminLayout,
            crate::models::admin::Fieldset,
            crate::models::admin::InlineLayout,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Public catalog browsing"),
        (name = "admin", description = "Catalog administration")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_admin_and_catalog_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/catalog"));
        assert!(paths.iter().any(|p| p.as_str() == "/admin/book-instances/{id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/admin/layouts/{model}"));
    }
}
