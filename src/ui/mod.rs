//! Desktop rendering: selector panel, toolbar and chart.

pub mod fonts;
pub mod panels;
pub mod plot;
pub mod text;
