// src/domain/mod.rs
pub mod month_year;
pub mod subscription_model;
