pub mod d410_executive_summary;
pub mod d411_pricing;
pub mod d412_product_map;
pub mod d413_revenue_diagnosis;
pub mod d414_seasonality;
pub mod d415_outlook;
