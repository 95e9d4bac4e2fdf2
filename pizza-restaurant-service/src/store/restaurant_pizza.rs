use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::models::{NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::store::StoreError;
use crate::validation::validate_price;

/// An association row joined with both of its owners.
pub type RestaurantPizzaRow = (RestaurantPizza, Pizza, Restaurant);

fn load(conn: &mut SqliteConnection, id: i32) -> Result<RestaurantPizzaRow, StoreError> {
    restaurant_pizzas::table
        .inner_join(pizzas::table)
        .inner_join(restaurants::table)
        .filter(restaurant_pizzas::id.eq(id))
        .select((
            RestaurantPizza::as_select(),
            Pizza::as_select(),
            Restaurant::as_select(),
        ))
        .first(conn)
        .optional()?
        .ok_or(StoreError::NotFound("RestaurantPizza"))
}

/// Inserts the association and returns it with its pizza and restaurant.
/// Unknown owner ids fail on the foreign key constraints and nothing is
/// written.
pub fn create(
    conn: &mut SqliteConnection,
    restaurant_pizza: NewRestaurantPizza,
) -> Result<RestaurantPizzaRow, StoreError> {
    conn.transaction(|conn| {
        let created = diesel::insert_into(restaurant_pizzas::table)
            .values(&restaurant_pizza)
            .returning(RestaurantPizza::as_returning())
            .get_result(conn)?;
        load(conn, created.id)
    })
}

pub fn find(conn: &mut SqliteConnection, id: i32) -> Result<RestaurantPizzaRow, StoreError> {
    conn.transaction(|conn| load(conn, id))
}

/// Changes the price of an existing association. The new price is checked
/// before the update is issued.
pub fn update_price(
    conn: &mut SqliteConnection,
    id: i32,
    price: i32,
) -> Result<RestaurantPizza, StoreError> {
    let price = validate_price(price)?;
    conn.transaction(|conn| {
        diesel::update(restaurant_pizzas::table.find(id))
            .set(restaurant_pizzas::price.eq(price))
            .returning(RestaurantPizza::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or(StoreError::NotFound("RestaurantPizza"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewPizza, NewRestaurant};
    use crate::store::testing::test_store;
    use crate::store::{pizza, restaurant};
    use crate::validation::ValidationError;

    fn owners(conn: &mut SqliteConnection) -> (Restaurant, Pizza) {
        let restaurant = restaurant::create(
            conn,
            &NewRestaurant {
                name: "Kiki's Pizza".to_string(),
                address: "address3".to_string(),
            },
        )
        .unwrap();
        let pizza = pizza::create(
            conn,
            &NewPizza {
                name: "Emma".to_string(),
                ingredients: "Dough, Tomato Sauce, Cheese".to_string(),
            },
        )
        .unwrap();
        (restaurant, pizza)
    }

    fn count(conn: &mut SqliteConnection) -> i64 {
        restaurant_pizzas::table.count().get_result(conn).unwrap()
    }

    #[test]
    fn test_create_returns_owners() {
        let t = test_store();
        let conn = &mut t.store.connect().unwrap();
        let (restaurant, pizza) = owners(conn);

        let (created, created_pizza, created_restaurant) = create(
            conn,
            NewRestaurantPizza::new(restaurant.id, pizza.id, 12).unwrap(),
        )
        .unwrap();
        assert_eq!(created.price, 12);
        assert_eq!(created.pizza_id, pizza.id);
        assert_eq!(created.restaurant_id, restaurant.id);
        assert_eq!(created_pizza, pizza);
        assert_eq!(created_restaurant, restaurant);
        assert_eq!(find(conn, created.id).unwrap().0, created);
    }

    #[test]
    fn test_create_with_unknown_owner_writes_nothing() {
        let t = test_store();
        let conn = &mut t.store.connect().unwrap();
        let (restaurant, _) = owners(conn);

        let result = create(conn, NewRestaurantPizza::new(restaurant.id, 999, 10).unwrap());
        assert!(matches!(result, Err(StoreError::Query(_))));
        assert_eq!(count(conn), 0);
    }

    #[test]
    fn test_update_price() {
        let t = test_store();
        let conn = &mut t.store.connect().unwrap();
        let (restaurant, pizza) = owners(conn);
        let (created, _, _) = create(
            conn,
            NewRestaurantPizza::new(restaurant.id, pizza.id, 12).unwrap(),
        )
        .unwrap();

        let updated = update_price(conn, created.id, 30).unwrap();
        assert_eq!(updated.price, 30);

        let rejected = update_price(conn, created.id, 31);
        assert!(matches!(
            rejected,
            Err(StoreError::Validation(ValidationError::PriceOutOfRange(31)))
        ));
        assert_eq!(find(conn, created.id).unwrap().0.price, 30);
    }

    #[test]
    fn test_update_price_of_missing_row() {
        let t = test_store();
        let conn = &mut t.store.connect().unwrap();
        assert!(matches!(
            update_price(conn, 5, 10),
            Err(StoreError::NotFound("RestaurantPizza"))
        ));
    }

    #[test]
    fn test_check_constraint_backs_validation() {
        let t = test_store();
        let conn = &mut t.store.connect().unwrap();
        let (restaurant, pizza) = owners(conn);

        let result = diesel::insert_into(restaurant_pizzas::table)
            .values((
                restaurant_pizzas::price.eq(0),
                restaurant_pizzas::pizza_id.eq(pizza.id),
                restaurant_pizzas::restaurant_id.eq(restaurant.id),
            ))
            .execute(conn);
        assert!(result.is_err());
        assert_eq!(count(conn), 0);
    }
}
