mod error;
mod ui;
