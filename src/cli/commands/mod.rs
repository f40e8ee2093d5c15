pub mod detect;
pub mod resolve;
pub mod run;
