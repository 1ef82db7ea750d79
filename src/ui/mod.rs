//! egui rendering: navigation, page layouts and the chart renderer.

pub mod pages;
pub mod panels;
pub mod plot;
