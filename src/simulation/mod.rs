pub mod random_session;
