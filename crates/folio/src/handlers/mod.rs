pub mod dashboard;
pub mod error;
pub mod flash;
pub mod form;
pub mod health;
pub mod login;
pub mod pages;
pub mod projects;
pub mod root;
pub mod upload;
pub mod uploads;

