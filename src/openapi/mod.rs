use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Food Expenses API",
        version = "0.1.0",
        description = r#"
Tracks grocery-delivery shipments and their products and builds a spending
report over delivered shipments.

Failed requests answer with a JSON body:

```json
{
  "error": "Not Found",
  "message": "Not found: shipment H01234567890 does not exist",
  "request_id": "0c6f0b5e-4a3f-4a55-9d3e-0d1f3c1f9a11",
  "timestamp": "2024-01-01T00:00:00Z"
}
```

Database constraint violations (duplicate shipment number, unknown or still
referenced shipment) answer with 503 and carry the database message.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development")
    ),
    tags(
        (name = "shipment", description = "Delivery orders"),
        (name = "product", description = "Line items of a delivery order"),
        (name = "report", description = "Spending report"),
        (name = "health", description = "Health check")
    ),
    paths(
        crate::handlers::shipments::get_shipment,
        crate::handlers::shipments::create_shipment,
        crate::handlers::shipments::update_shipment,
        crate::handlers::shipments::delete_shipment,
        crate::handlers::products::get_products,
        crate::handlers::products::create_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_products,
        crate::handlers::reports::get_spending_report,
        crate::health::health_check,
    ),
    components(
        schemas(
            crate::dto::ShowShipment,
            crate::dto::CreateShipment,
            crate::dto::UpdateShipmentRequest,
            crate::dto::UpdatedShipmentResponse,
            crate::dto::DeletedShipmentResponse,
            crate::dto::ShowProduct,
            crate::dto::CreateProduct,
            crate::dto::UpdateProductRequest,
            crate::dto::UpdatedProductResponse,
            crate::dto::DeletedProductResponse,
            crate::dto::ReportResponse,
            crate::health::HealthInfo,
            crate::health::HealthStatus,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
