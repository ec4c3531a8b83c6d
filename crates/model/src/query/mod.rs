pub mod descriptor;
pub mod join;
