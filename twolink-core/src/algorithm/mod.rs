pub mod ik;
pub mod select;
