pub mod aws;
pub mod cli;
pub mod docker;
pub mod executor;
pub mod util;
pub mod workflow;
