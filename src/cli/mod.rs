pub mod convert;
pub mod rates;
pub mod select;
pub mod setup;
pub mod ui;
