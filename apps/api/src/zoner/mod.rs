// Zoner: mock zoning-document Q&A. Answers are canned and keyword-matched; no document is read.

pub mod answers;
pub mod handlers;
pub mod models;
