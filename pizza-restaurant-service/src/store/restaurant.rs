use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::models::{NewRestaurant, Pizza, Restaurant, RestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::store::StoreError;

pub fn list(conn: &mut SqliteConnection) -> Result<Vec<Restaurant>, StoreError> {
    let results = restaurants::table
        .select(Restaurant::as_select())
        .order(restaurants::id)
        .load(conn)?;
    Ok(results)
}

fn get(conn: &mut SqliteConnection, restaurant_id: i32) -> Result<Restaurant, StoreError> {
    restaurants::table
        .find(restaurant_id)
        .select(Restaurant::as_select())
        .first(conn)
        .optional()?
        .ok_or(StoreError::NotFound("Restaurant"))
}

/// Loads a restaurant together with its priced pizzas.
pub fn find(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
) -> Result<(Restaurant, Vec<(RestaurantPizza, Pizza)>), StoreError> {
    conn.transaction(|conn| {
        let restaurant = get(conn, restaurant_id)?;
        let menu = RestaurantPizza::belonging_to(&restaurant)
            .inner_join(pizzas::table)
            .select((RestaurantPizza::as_select(), Pizza::as_select()))
            .order(restaurant_pizzas::id)
            .load::<(RestaurantPizza, Pizza)>(conn)?;
        Ok((restaurant, menu))
    })
}

pub fn create(
    conn: &mut SqliteConnection,
    restaurant: &NewRestaurant,
) -> Result<Restaurant, StoreError> {
    conn.transaction(|conn| {
        let created = diesel::insert_into(restaurants::table)
            .values(restaurant)
            .returning(Restaurant::as_returning())
            .get_result(conn)?;
        Ok(created)
    })
}

/// Deletes the restaurant and every association row it owns. Returns the
/// number of association rows removed.
pub fn delete(conn: &mut SqliteConnection, restaurant_id: i32) -> Result<usize, StoreError> {
    conn.transaction(|conn| {
        let removed = diesel::delete(
            restaurant_pizzas::table.filter(restaurant_pizzas::restaurant_id.eq(restaurant_id)),
        )
        .execute(conn)?;
        let deleted = diesel::delete(restaurants::table.find(restaurant_id)).execute(conn)?;
        if deleted == 0 {
            return Err(StoreError::NotFound("Restaurant"));
        }
        Ok(removed)
    })
}

/// Pizzas offered by the restaurant, projected through its association rows.
pub fn pizzas_for_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
) -> Result<Vec<Pizza>, StoreError> {
    conn.transaction(|conn| {
        let restaurant = get(conn, restaurant_id)?;
        let results = RestaurantPizza::belonging_to(&restaurant)
            .inner_join(pizzas::table)
            .select(Pizza::as_select())
            .order(restaurant_pizzas::id)
            .load(conn)?;
        Ok(results)
    })
}
