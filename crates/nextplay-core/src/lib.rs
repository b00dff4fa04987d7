// Library root: the client-side core of the NextPlay projection viewer.
//
// Everything the terminal front end needs lives here so integration tests and
// alternative front ends can drive the workflow without a terminal.

pub mod api;
pub mod config;
pub mod history;
pub mod model;
pub mod protocol;
pub mod roster;
pub mod stats;
pub mod teams;
pub mod workflow;
