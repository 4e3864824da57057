mod configuration;
mod definitions;
mod error;
