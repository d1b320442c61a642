pub mod catalog;
pub mod demo;
pub mod price;
pub mod run;
