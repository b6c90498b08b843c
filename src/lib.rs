// Family Calendar Library
// Continuous-scroll temporal grid engine for the Day and Month views

pub mod models;
pub mod services;
pub mod utils;
