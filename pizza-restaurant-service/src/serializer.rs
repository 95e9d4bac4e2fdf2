//! Response shapes. Each view lists exactly the fields it exposes; nested
//! association rows never carry the owner they were reached from, which
//! keeps restaurant -> association -> pizza graphs from recursing.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models;

/// Flat restaurant, used in lists and as a nested owner.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RestaurantSummary {
    pub id: i32,
    pub name: String,
    pub address: String,
}

/// Flat pizza, used in lists and as a nested owner.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PizzaSummary {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RestaurantDetail {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaWithPizza>,
}

/// Association row nested under a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RestaurantPizzaWithPizza {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: PizzaSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PizzaDetail {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaWithRestaurant>,
}

/// Association row nested under a pizza.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RestaurantPizzaWithRestaurant {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub restaurant: RestaurantSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RestaurantPizzaDetail {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: PizzaSummary,
    pub restaurant: RestaurantSummary,
}

impl From<models::Restaurant> for RestaurantSummary {
    fn from(restaurant: models::Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
        }
    }
}

impl From<models::Pizza> for PizzaSummary {
    fn from(pizza: models::Pizza) -> Self {
        Self {
            id: pizza.id,
            name: pizza.name,
            ingredients: pizza.ingredients,
        }
    }
}

pub fn serialize_restaurant_detail(
    restaurant: models::Restaurant,
    menu: Vec<(models::RestaurantPizza, models::Pizza)>,
) -> RestaurantDetail {
    RestaurantDetail {
        id: restaurant.id,
        name: restaurant.name,
        address: restaurant.address,
        restaurant_pizzas: menu
            .into_iter()
            .map(|(rp, pizza)| RestaurantPizzaWithPizza {
                id: rp.id,
                price: rp.price,
                pizza_id: rp.pizza_id,
                restaurant_id: rp.restaurant_id,
                pizza: pizza.into(),
            })
            .collect(),
    }
}

pub fn serialize_pizza_detail(
    pizza: models::Pizza,
    offers: Vec<(models::RestaurantPizza, models::Restaurant)>,
) -> PizzaDetail {
    PizzaDetail {
        id: pizza.id,
        name: pizza.name,
        ingredients: pizza.ingredients,
        restaurant_pizzas: offers
            .into_iter()
            .map(|(rp, restaurant)| RestaurantPizzaWithRestaurant {
                id: rp.id,
                price: rp.price,
                pizza_id: rp.pizza_id,
                restaurant_id: rp.restaurant_id,
                restaurant: restaurant.into(),
            })
            .collect(),
    }
}

pub fn serialize_restaurant_pizza(
    restaurant_pizza: models::RestaurantPizza,
    pizza: models::Pizza,
    restaurant: models::Restaurant,
) -> RestaurantPizzaDetail {
    RestaurantPizzaDetail {
        id: restaurant_pizza.id,
        price: restaurant_pizza.price,
        pizza_id: restaurant_pizza.pizza_id,
        restaurant_id: restaurant_pizza.restaurant_id,
        pizza: pizza.into(),
        restaurant: restaurant.into(),
    }
}
