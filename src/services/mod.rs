//! Service layer
//!
//! Ties the cluster source, resolvers and sinks together so the CLI only
//! deals with arguments and output.

pub mod export_service;

pub use export_service::ExportService;
