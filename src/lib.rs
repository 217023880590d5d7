pub mod api;
pub mod config;
pub mod db;
pub mod engine;
pub mod language;
pub mod orchestrator;
pub mod recorder;
pub mod session;
pub mod symptoms;
pub mod tips;
pub mod triage;
