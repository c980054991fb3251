pub mod chart;
pub mod growth;
pub mod split;
pub mod window;
