//! Shared test harness modules for the Pathfinder CLI.

use super::*;

mod helpers;
mod solve_steps;
