use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::models::{NewPizza, Pizza, Restaurant, RestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::store::StoreError;

pub fn list(conn: &mut SqliteConnection) -> Result<Vec<Pizza>, StoreError> {
    let results = pizzas::table
        .select(Pizza::as_select())
        .order(pizzas::id)
        .load(conn)?;
    Ok(results)
}

fn get(conn: &mut SqliteConnection, pizza_id: i32) -> Result<Pizza, StoreError> {
    pizzas::table
        .find(pizza_id)
        .select(Pizza::as_select())
        .first(conn)
        .optional()?
        .ok_or(StoreError::NotFound("Pizza"))
}

pub fn find(
    conn: &mut SqliteConnection,
    pizza_id: i32,
) -> Result<(Pizza, Vec<(RestaurantPizza, Restaurant)>), StoreError> {
    conn.transaction(|conn| {
        let pizza = get(conn, pizza_id)?;
        let offers = RestaurantPizza::belonging_to(&pizza)
            .inner_join(restaurants::table)
            .select((RestaurantPizza::as_select(), Restaurant::as_select()))
            .order(restaurant_pizzas::id)
            .load::<(RestaurantPizza, Restaurant)>(conn)?;
        Ok((pizza, offers))
    })
}

pub fn create(conn: &mut SqliteConnection, pizza: &NewPizza) -> Result<Pizza, StoreError> {
    conn.transaction(|conn| {
        let created = diesel::insert_into(pizzas::table)
            .values(pizza)
            .returning(Pizza::as_returning())
            .get_result(conn)?;
        Ok(created)
    })
}

pub fn delete(conn: &mut SqliteConnection, pizza_id: i32) -> Result<usize, StoreError> {
    conn.transaction(|conn| {
        let removed =
            diesel::delete(restaurant_pizzas::table.filter(restaurant_pizzas::pizza_id.eq(pizza_id)))
                .execute(conn)?;
        let deleted = diesel::delete(pizzas::table.find(pizza_id)).execute(conn)?;
        if deleted == 0 {
            return Err(StoreError::NotFound("Pizza"));
        }
        Ok(removed)
    })
}

pub fn restaurants_for_pizza(
    conn: &mut SqliteConnection,
    pizza_id: i32,
) -> Result<Vec<Restaurant>, StoreError> {
    conn.transaction(|conn| {
        let pizza = get(conn, pizza_id)?;
        let results = RestaurantPizza::belonging_to(&pizza)
            .inner_join(restaurants::table)
            .select(Restaurant::as_select())
            .order(restaurant_pizzas::id)
            .load(conn)?;
        Ok(results)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewRestaurant, NewRestaurantPizza};
    use crate::store::testing::test_store;
    use crate::store::{restaurant, restaurant_pizza};

    #[test]
    fn test_delete_pizza_cascades_only_its_associations() {
        let t = test_store();
        let conn = &mut t.store.connect().unwrap();
        let shack = restaurant::create(
            conn,
            &NewRestaurant {
                name: "Sanjay's Pizza".to_string(),
                address: "address2".to_string(),
            },
        )
        .unwrap();
        let cheese = create(
            conn,
            &NewPizza {
                name: "Cheese".to_string(),
                ingredients: "Dough, Cheese".to_string(),
            },
        )
        .unwrap();
        let veggie = create(
            conn,
            &NewPizza {
                name: "Veggie".to_string(),
                ingredients: "Dough, Peppers, Onion".to_string(),
            },
        )
        .unwrap();
        restaurant_pizza::create(conn, NewRestaurantPizza::new(shack.id, cheese.id, 7).unwrap())
            .unwrap();
        restaurant_pizza::create(conn, NewRestaurantPizza::new(shack.id, veggie.id, 11).unwrap())
            .unwrap();

        assert_eq!(delete(conn, cheese.id).unwrap(), 1);

        let (_, menu) = restaurant::find(conn, shack.id).unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].1, veggie);
        assert!(matches!(find(conn, cheese.id), Err(StoreError::NotFound("Pizza"))));
    }

    #[test]
    fn test_find_and_restaurants_for_pizza() {
        let t = test_store();
        let conn = &mut t.store.connect().unwrap();
        let first = restaurant::create(
            conn,
            &NewRestaurant {
                name: "First".to_string(),
                address: "1 Main St".to_string(),
            },
        )
        .unwrap();
        let second = restaurant::create(
            conn,
            &NewRestaurant {
                name: "Second".to_string(),
                address: "2 Main St".to_string(),
            },
        )
        .unwrap();
        let cheese = create(
            conn,
            &NewPizza {
                name: "Cheese".to_string(),
                ingredients: "Dough, Cheese".to_string(),
            },
        )
        .unwrap();
        restaurant_pizza::create(conn, NewRestaurantPizza::new(first.id, cheese.id, 3).unwrap())
            .unwrap();
        restaurant_pizza::create(conn, NewRestaurantPizza::new(second.id, cheese.id, 4).unwrap())
            .unwrap();

        let (found, offers) = find(conn, cheese.id).unwrap();
        assert_eq!(found, cheese);
        assert_eq!(
            offers.iter().map(|(rp, _)| rp.price).collect::<Vec<_>>(),
            vec![3, 4]
        );
        assert_eq!(
            restaurants_for_pizza(conn, cheese.id).unwrap(),
            vec![first, second]
        );
    }

    #[test]
    fn test_delete_missing_pizza() {
        let t = test_store();
        let conn = &mut t.store.connect().unwrap();
        assert!(matches!(delete(conn, 1), Err(StoreError::NotFound("Pizza"))));
    }
}
