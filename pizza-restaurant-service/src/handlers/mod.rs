pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

use axum::{response::Html, response::Json, routing::get, Router};
use serde::{Deserialize, Deserializer};
use utoipa::OpenApi;

use crate::error::ApiError;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/api-docs/openapi.json", get(openapi))
        .merge(restaurant::router())
        .merge(pizza::router())
        .merge(restaurant_pizza::router())
}

async fn index() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

// Body fields are `Option<Option<T>>`: the outer `None` is an absent key
// (via `#[serde(default)]`), `Some(None)` is an explicit `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn required<T>(value: Option<Option<T>>, key: &'static str) -> Result<T, ApiError> {
    match value {
        None => Err(ApiError::MissingKey(key)),
        Some(None) => Err(ApiError::NullValue(key)),
        Some(Some(value)) => Ok(value),
    }
}

/// Ids wider than the id columns cannot name a stored row.
fn narrow_id(id: i64, entity: &'static str) -> Result<i32, ApiError> {
    i32::try_from(id).map_err(|_| ApiError::NotFound(entity))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::create_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        pizza::get_pizza,
        pizza::create_pizza,
        pizza::delete_pizza,
        restaurant_pizza::create_restaurant_pizza,
    ),
    components(
        schemas(
            crate::serializer::RestaurantSummary,
            crate::serializer::RestaurantDetail,
            crate::serializer::RestaurantPizzaWithPizza,
            crate::serializer::PizzaSummary,
            crate::serializer::PizzaDetail,
            crate::serializer::RestaurantPizzaWithRestaurant,
            crate::serializer::RestaurantPizzaDetail,
            restaurant::CreateRestaurantRequest,
            pizza::CreatePizzaRequest,
            restaurant_pizza::CreateRestaurantPizzaRequest,
            crate::error::ApiErrorResponse,
            crate::error::ApiErrorsResponse,
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant endpoints"),
        (name = "pizzas", description = "Pizza endpoints"),
        (name = "restaurant_pizzas", description = "Priced restaurant/pizza associations")
    ),
    info(
        title = "Pizza Restaurant Service",
        description = "Restaurants, pizzas and the prices restaurants charge for them",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_names_missing_key() {
        assert_eq!(required(Some(Some(3)), "price").unwrap(), 3);
        let err = required::<i32>(None, "price").unwrap_err();
        assert_eq!(err.to_string(), "Missing key: 'price'");
    }

    #[test]
    fn required_tells_null_from_missing() {
        let err = required::<i32>(Some(None), "price").unwrap_err();
        assert!(matches!(err, ApiError::NullValue("price")));
        assert_eq!(err.to_string(), "Invalid value for 'price': null");
    }

    #[test]
    fn present_keeps_null_apart_from_absent() {
        #[derive(Deserialize)]
        struct Body {
            #[serde(default, deserialize_with = "present")]
            price: Option<Option<i64>>,
        }

        let absent: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.price, None);
        let null: Body = serde_json::from_str(r#"{"price":null}"#).unwrap();
        assert_eq!(null.price, Some(None));
        let set: Body = serde_json::from_str(r#"{"price":7}"#).unwrap();
        assert_eq!(set.price, Some(Some(7)));
    }

    #[test]
    fn narrow_id_rejects_wide_ids_as_not_found() {
        assert_eq!(narrow_id(42, "Restaurant").unwrap(), 42);
        let err = narrow_id(3_000_000_000, "Restaurant").unwrap_err();
        assert!(matches!(err, ApiError::NotFound("Restaurant")));
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/restaurants",
            "/restaurants/{id}",
            "/pizzas",
            "/pizzas/{id}",
            "/restaurant_pizzas",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
