use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::models::{NewPizza, NewRestaurant, NewRestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::store::{pizza, restaurant, restaurant_pizza, StoreError};

const RESTAURANTS: [(&str, &str); 3] = [
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: [(&str, &str); 3] = [
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

// (restaurant index, pizza index, price)
const MENU: [(usize, usize, i32); 3] = [(0, 0, 1), (1, 1, 4), (2, 2, 5)];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

/// Clears all tables and loads the sample data set.
pub fn run(conn: &mut SqliteConnection) -> Result<SeedSummary, StoreError> {
    conn.transaction(|conn| {
        diesel::delete(restaurant_pizzas::table).execute(conn)?;
        diesel::delete(pizzas::table).execute(conn)?;
        diesel::delete(restaurants::table).execute(conn)?;

        let created_restaurants = RESTAURANTS
            .iter()
            .map(|(name, address)| {
                restaurant::create(
                    conn,
                    &NewRestaurant {
                        name: name.to_string(),
                        address: address.to_string(),
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        let created_pizzas = PIZZAS
            .iter()
            .map(|(name, ingredients)| {
                pizza::create(
                    conn,
                    &NewPizza {
                        name: name.to_string(),
                        ingredients: ingredients.to_string(),
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut summary = SeedSummary {
            restaurants: created_restaurants.len(),
            pizzas: created_pizzas.len(),
            ..Default::default()
        };
        for (r, p, price) in MENU {
            let link = NewRestaurantPizza::new(
                created_restaurants[r].id,
                created_pizzas[p].id,
                price,
            )?;
            restaurant_pizza::create(conn, link)?;
            summary.restaurant_pizzas += 1;
        }

        info!(?summary, "Seeded sample data");
        Ok(summary)
    })
}
