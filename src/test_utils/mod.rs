#![allow(missing_docs)]

pub(crate) mod http;

pub(crate) use http::{closed_upstream, response_json, spawn_upstream};
