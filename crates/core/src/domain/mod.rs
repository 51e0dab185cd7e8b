pub mod board;
pub mod catalog;
pub mod item;
pub mod quote;
pub mod settings;
