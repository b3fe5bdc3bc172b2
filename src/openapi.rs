use utoipa::OpenApi;

use crate::api;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health,
        api::cards,
        api::api_status,
        api::generate,
    ),
    components(
        schemas(api::CardRequest, api::CardResponse, api::HealthResponse)
    ),
    tags(
        (name = "cardgen", description = "cardgen backend API")
    )
)]
pub struct ApiDoc;
