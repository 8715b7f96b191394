pub mod envelope;
pub mod governor;
pub mod intent;
pub mod pilot;
pub mod vehicle;
pub mod world;
