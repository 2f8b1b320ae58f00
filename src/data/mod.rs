pub mod items;
pub mod moves;
pub mod natures;
pub mod species;
pub mod type_chart;
