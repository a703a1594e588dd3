pub mod script;
pub mod state;
pub mod store;
pub mod validation;
