//! Meeting-point planner server.
//!
//! A web application that answers: "We're all starting from different
//! places, which station should we meet at?"

pub mod domain;
pub mod estimate;
pub mod planner;
pub mod routing;
pub mod stations;
pub mod web;
