//! Adapter utilities for the `windowed-list` crate.
//!
//! The `windowed-list` crate is UI-agnostic and only produces offsets, windows and positions.
//! This crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - Scroll strategies: translate the content layer, or drive a native scroll container
//! - A controller that turns engine state into scroll commands and keeps a slot pool in sync
//!
//! No UI toolkit bindings live here.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

mod controller;
mod strategy;


pub use controller::Controller;
pub use strategy::{ScrollCommand, ScrollStrategy};
