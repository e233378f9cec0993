//! Bazaar Storefront library.
//!
//! Everything a front end needs to run the store: the shopping cart, the
//! persisted login session, adapters for the backend's HTTP API, and
//! headless view controllers that hold each page's state and decisions.
//!
//! # Architecture
//!
//! - [`state::AppState`] is created once at startup and passed to every
//!   view. It owns the key-value store, the session, the cart and the API
//!   clients; nothing in this crate uses global state.
//! - [`storage`] is the local key-value store (`token`, `user`, `cart`).
//! - [`api`] translates each method call into one backend request.
//! - [`cart`] is the only component with real invariants.
//! - [`views`] never call each other; they return the next
//!   [`views::Route`] instead.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod state;
pub mod storage;
pub mod views;
