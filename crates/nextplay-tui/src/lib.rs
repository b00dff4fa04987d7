// Terminal front end for the NextPlay projection viewer.

pub mod tui;
