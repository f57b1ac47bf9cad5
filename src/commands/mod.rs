pub mod dataset;
pub mod pages;
pub mod recommend;
pub mod score;
