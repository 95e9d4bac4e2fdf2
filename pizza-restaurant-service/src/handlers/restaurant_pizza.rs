use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::error::{ApiError, ApiErrorsResponse};
use crate::models::NewRestaurantPizza;
use crate::serializer::{serialize_restaurant_pizza, RestaurantPizzaDetail};
use crate::store;

use super::{required, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Restaurant offering the pizza
    #[serde(default, deserialize_with = "super::present")]
    #[schema(value_type = Option<i32>)]
    pub restaurant_id: Option<Option<i32>>,
    /// Pizza being offered
    #[serde(default, deserialize_with = "super::present")]
    #[schema(value_type = Option<i32>)]
    pub pizza_id: Option<Option<i32>>,
    /// Price between 1 and 30
    #[serde(default, deserialize_with = "super::present")]
    #[schema(value_type = Option<i64>)]
    pub price: Option<Option<i64>>,
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Association created", body = RestaurantPizzaDetail),
        (status = 400, description = "Missing key, invalid price or unknown owner", body = ApiErrorsResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizzaDetail>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::Rejected(e.body_text()))?;
    let restaurant_id = required(payload.restaurant_id, "restaurant_id")?;
    let pizza_id = required(payload.pizza_id, "pizza_id")?;
    let price = required(payload.price, "price")?;

    // Anything wider than i32 is already outside the price range.
    let price = i32::try_from(price).map_err(|_| ApiError::Validation)?;
    let restaurant_pizza = NewRestaurantPizza::new(restaurant_id, pizza_id, price)
        .map_err(|_| ApiError::Validation)?;

    let (created, pizza, restaurant) = state
        .store
        .interact(move |conn| store::restaurant_pizza::create(conn, restaurant_pizza))
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create restaurant pizza");
            ApiError::rejected(e)
        })?;
    info!(restaurant_pizza_id = created.id, "Restaurant pizza created");

    Ok((
        StatusCode::CREATED,
        Json(serialize_restaurant_pizza(created, pizza, restaurant)),
    ))
}
