// Fortune engine: BaZi pillars, name strokes, daily luck.
// Calculators produce facts, narrative turns facts into text, scoring attaches
// the saved score, service persists each reading as history.

pub mod bazi;
pub mod daily;
pub mod handlers;
pub mod history;
pub mod models;
pub mod name;
pub mod narrative;
pub mod random;
pub mod scoring;
pub mod service;
pub mod symbols;
