// PlanIt: mock AR street-view scene generator.

pub mod handlers;
pub mod models;
pub mod scene;
