//! PrestaShop Console Library
//!
//! This library provides the download-and-extract installer behind the
//! `prestashop` CLI. The [`core::installer::Installer`] is generic over its
//! [`core::download::Fetcher`] and [`core::archive::Archiver`] so either can
//! be swapped out.

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;
