pub mod erosion;
pub mod executive;
pub mod primitives;
pub mod products;
pub mod profitability;
pub mod seasonality;
pub mod weekdays;
