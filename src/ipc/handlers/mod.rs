pub mod core;
pub mod levels;
pub mod programs;
pub mod shell;
pub mod students;
