//! Integration test crate for IMF Differ.
//!
//! Holds cross-crate tests that write real package directories to disk, load
//! them, and check the exports and tree projection built from them.

#[cfg(test)]
mod fixture;


#[cfg(test)]
mod export;
