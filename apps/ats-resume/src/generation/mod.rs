// Resume generation: prompt composition plus the single completion call.
// All completion calls go through llm_client.

pub mod generator;
pub mod runner;
