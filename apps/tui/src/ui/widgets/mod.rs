pub mod bars;
pub mod choropleth;
pub mod legend;
pub mod popup;
pub mod scatter;
pub mod tables;
