//! # synoptic-wiki
//!
//! Wikipedia content fetcher for the synoptic pipeline.
//!
//! Wraps the MediaWiki Action API behind the
//! [`ArticleSource`](synoptic_core::ArticleSource) trait. Lookups are by
//! exact title; the three recoverable failure modes (missing page,
//! disambiguation, transport failure) come back as
//! [`ArticleContent`](synoptic_core::ArticleContent) variants rather than
//! errors.

pub mod client;

pub use client::WikipediaClient;
