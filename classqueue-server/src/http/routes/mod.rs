//! Route handlers organized by resource

pub mod guests;
pub mod health;
pub mod pages;
