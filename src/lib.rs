//! # CrabMine Telegram Bot
//!
//! Menu-driven front-end for the CrabMine Minecraft server: shows the
//! privilege price list and forwards ideas, complaints and staff
//! applications to an administrator chat.

pub mod bot;
pub mod catalog;
pub mod config;
pub mod dialogue;
pub mod localization;
pub mod session_store;
