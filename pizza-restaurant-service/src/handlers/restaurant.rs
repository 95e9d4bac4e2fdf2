use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::error::{ApiError, ApiErrorResponse, ApiErrorsResponse};
use crate::models::NewRestaurant;
use crate::serializer::{serialize_restaurant_detail, RestaurantDetail, RestaurantSummary};
use crate::store;

use super::{narrow_id, required, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants).post(create_restaurant))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantRequest {
    /// Name of the restaurant
    #[serde(default, deserialize_with = "super::present")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    /// Street address of the restaurant
    #[serde(default, deserialize_with = "super::present")]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "All restaurants", body = [RestaurantSummary]),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantSummary>>, ApiError> {
    let restaurants = state.store.interact(store::restaurant::list).await?;
    Ok(Json(restaurants.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant with its priced pizzas", body = RestaurantDetail),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i64, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RestaurantDetail>, ApiError> {
    let id = narrow_id(id, "Restaurant")?;
    let (restaurant, menu) = state
        .store
        .interact(move |conn| store::restaurant::find(conn, id))
        .await?;
    Ok(Json(serialize_restaurant_detail(restaurant, menu)))
}

#[utoipa::path(
    post,
    path = "/restaurants",
    request_body = CreateRestaurantRequest,
    responses(
        (status = 201, description = "Restaurant created", body = RestaurantSummary),
        (status = 400, description = "Bad request", body = ApiErrorsResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn create_restaurant(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantSummary>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::Rejected(e.body_text()))?;
    let restaurant = NewRestaurant {
        name: required(payload.name, "name")?,
        address: required(payload.address, "address")?,
    };

    let created = state
        .store
        .interact(move |conn| store::restaurant::create(conn, &restaurant))
        .await
        .map_err(ApiError::rejected)?;
    info!(restaurant_id = created.id, "Restaurant created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its priced pizzas deleted"),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i64, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let id = narrow_id(id, "Restaurant")?;
    let removed = state
        .store
        .interact(move |conn| store::restaurant::delete(conn, id))
        .await?;
    info!(restaurant_id = id, removed, "Restaurant deleted");

    Ok(StatusCode::NO_CONTENT)
}
