pub mod check;
pub mod hook;
pub mod install;
