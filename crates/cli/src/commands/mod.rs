mod check;

pub use check::CheckCommand;
pub use test::TestCommand;
