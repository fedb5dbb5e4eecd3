pub mod index;
pub mod list;
pub mod pages;
pub mod run;
