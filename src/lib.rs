//! Library crate for indovinati-back: the in-memory word game engine and the
//! HTTP boundary a chat transport talks to.

pub mod config;
mod dto;
mod error;
pub mod messages;
pub mod routes;
pub mod services;
pub mod state;
