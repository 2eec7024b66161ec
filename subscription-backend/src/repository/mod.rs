// src/repository/mod.rs
pub mod subscription_repository;
