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
use crate::models::NewPizza;
use crate::serializer::{serialize_pizza_detail, PizzaDetail, PizzaSummary};
use crate::store;

use super::{narrow_id, required, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pizzas", get(list_pizzas).post(create_pizza))
        .route("/pizzas/{id}", get(get_pizza).delete(delete_pizza))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePizzaRequest {
    /// Name of the pizza
    #[serde(default, deserialize_with = "super::present")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    /// Free-form ingredient list
    #[serde(default, deserialize_with = "super::present")]
    #[schema(value_type = Option<String>)]
    pub ingredients: Option<Option<String>>,
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "All pizzas", body = [PizzaSummary]),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(State(state): State<AppState>) -> Result<Json<Vec<PizzaSummary>>, ApiError> {
    let pizzas = state.store.interact(store::pizza::list).await?;
    Ok(Json(pizzas.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/pizzas/{id}",
    responses(
        (status = 200, description = "Pizza with the restaurants that serve it", body = PizzaDetail),
        (status = 404, description = "Pizza not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i64, Path, description = "Pizza ID")
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn get_pizza(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PizzaDetail>, ApiError> {
    let id = narrow_id(id, "Pizza")?;
    let (pizza, offers) = state
        .store
        .interact(move |conn| store::pizza::find(conn, id))
        .await?;
    Ok(Json(serialize_pizza_detail(pizza, offers)))
}

#[utoipa::path(
    post,
    path = "/pizzas",
    request_body = CreatePizzaRequest,
    responses(
        (status = 201, description = "Pizza created", body = PizzaSummary),
        (status = 400, description = "Bad request", body = ApiErrorsResponse),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn create_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreatePizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PizzaSummary>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::Rejected(e.body_text()))?;
    let pizza = NewPizza {
        name: required(payload.name, "name")?,
        ingredients: required(payload.ingredients, "ingredients")?,
    };

    let created = state
        .store
        .interact(move |conn| store::pizza::create(conn, &pizza))
        .await
        .map_err(ApiError::rejected)?;
    info!(pizza_id = created.id, "Pizza created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    delete,
    path = "/pizzas/{id}",
    responses(
        (status = 204, description = "Pizza and its restaurant prices deleted"),
        (status = 404, description = "Pizza not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i64, Path, description = "Pizza ID")
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn delete_pizza(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let id = narrow_id(id, "Pizza")?;
    let removed = state
        .store
        .interact(move |conn| store::pizza::delete(conn, id))
        .await?;
    info!(pizza_id = id, removed, "Pizza deleted");

    Ok(StatusCode::NO_CONTENT)
}
