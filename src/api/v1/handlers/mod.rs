pub mod fallback;
pub mod health;
