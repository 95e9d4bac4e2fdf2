use std::ops::RangeInclusive;

pub const PRICE_RANGE: RangeInclusive<i32> = 1..=30;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("price must be between {} and {}", PRICE_RANGE.start(), PRICE_RANGE.end())]
    PriceOutOfRange(i32),
}

/// Returns `price` unchanged when it lies within [`PRICE_RANGE`].
pub fn validate_price(price: i32) -> Result<i32, ValidationError> {
    if PRICE_RANGE.contains(&price) {
        Ok(price)
    } else {
        Err(ValidationError::PriceOutOfRange(price))
    }
}
