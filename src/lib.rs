pub mod compute;
pub mod display;
pub mod entities;
pub mod input;
pub mod screens;
pub mod sound;
pub mod ui;
