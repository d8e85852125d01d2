// Core module - Session protocol and response handling
pub mod communication;
pub mod session;
