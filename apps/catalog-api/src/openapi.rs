//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "MongoDB-based REST API for managing products and items",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc),
        (path = "/api/items", api = domain_items::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints (MongoDB)"),
        (name = "Items", description = "Item management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
