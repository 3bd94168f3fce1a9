// Application layer for the life balance engine: services that feed stored
// history through the domain computations and persist today's results.

pub mod application;
pub mod presentation;
