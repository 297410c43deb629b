//! Workload script acquisition: a file read line by line, or one inline
//! command given on the command line.
mod reader;


pub use reader::ScriptReader;
