pub mod levels;
pub mod programs;
pub mod students;

pub use levels::LevelsPage;
pub use programs::ProgramsPage;
pub use students::StudentsPage;
