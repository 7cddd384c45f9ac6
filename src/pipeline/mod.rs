//! Validation-and-mutation pipelines.
//!
//! Every (resource, operation) pair is served by a [`Pipeline`]: validators
//! that check the request and fill a typed context, then one [`Handler`]
//! that acts on the record store.
//!
//! # Key Types
//!
//! - [`Pipeline`] / [`PipelineBuilder`] - validator chain plus terminal handler
//! - [`Validator`] - one step of the chain; [`Check`] wraps pure predicates
//! - [`Handler`] - terminal step; [`ListRecords`] and [`ReadAttached`] are shared
//! - [`Request`] / [`Reply`] - pipeline input and successful output

mod core;
mod handler;
mod validator;

pub use self::core::{Operation, Pipeline, PipelineBuilder, Reply, Request};
pub use handler::{Handler, ListRecords, ReadAttached, validated};
pub use validator::{Check, CheckFn, RecordExists, RouteIdMatches, Validator, route_id};
