//! Row models and create/update DTOs.

pub mod article;
pub mod article_image;
pub mod user;
