//! Client for the Hugging Face serverless inference API.

pub mod models;

pub use models::Models;
