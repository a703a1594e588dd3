pub mod balance;
pub mod currency;
pub mod expense;
pub mod participant;
