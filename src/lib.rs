//! Snake Arcade - the classic snake game on a 40x30 board
//!
//! This library provides:
//! - Core game logic, driven by raw ticks (game module)
//! - Local highscore list (leaderboard module)
//! - TUI rendering and keyboard input (render, input modules)
//! - The interactive terminal front end (modes module)

pub mod game;
pub mod input;
pub mod leaderboard;
pub mod modes;
pub mod render;
