pub mod check;
pub mod inventory;
