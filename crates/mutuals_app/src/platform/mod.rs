pub mod app;
mod commands;
mod effects;
mod ui;
