use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CoffeeDoc { pub id: String, pub name: String }

#[derive(ToSchema)]
pub struct CoffeeInputDoc { pub id: Option<String>, pub name: String }

#[derive(ToSchema)]
pub struct DroidDoc { pub id: String, pub description: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::coffees::list,
        crate::routes::coffees::get,
        crate::routes::coffees::create,
        crate::routes::coffees::upsert,
        crate::routes::coffees::delete,
        crate::routes::greeting::name,
        crate::routes::greeting::coffee,
        crate::routes::droid::get,
    ),
    components(
        schemas(
            HealthResponse,
            CoffeeDoc,
            CoffeeInputDoc,
            DroidDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "coffees"),
        (name = "config")
    )
)]
pub struct ApiDoc;
