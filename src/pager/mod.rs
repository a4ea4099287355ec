pub mod controller;
pub mod scroll;
