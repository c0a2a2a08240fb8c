/// Chart window widgets: statistics panels and the four plots.
pub mod panels;
pub mod plot;
