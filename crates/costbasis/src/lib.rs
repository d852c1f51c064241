//! FIFO cost basis CLI.
//!
//! This crate provides the `costbasis` command, which evaluates a hypothetical
//! sale of shares against a set of purchase lots:
//!
//! - `costbasis` with no subcommand starts the interactive prompt
//! - `costbasis remaining --quantity 150` - shares left after the sale
//! - `costbasis sold-basis --quantity 150` - cost basis per share of the sold shares
//! - `costbasis remaining-basis --quantity 150` - cost basis per share of what is left
//! - `costbasis profit --quantity 150 --price 40` - realized profit or loss
//! - `costbasis report --quantity 150 --price 40` - all of the above with a lot breakdown
//!
//! # Example Usage
//!
//! ```bash
//! costbasis --lots holdings.csv profit --quantity 150 --price 40
//! costbasis --lots holdings.json --format json report -q 150 -p 40
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod config;
pub mod input;
pub mod logging;
pub mod lots;
pub mod operation;
pub mod output;
