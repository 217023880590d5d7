pub mod chat;
pub mod dashboard;
pub mod health;
pub mod symptoms;
pub mod tips;
