//! Types shared by the job board client: ids, enums, backend records and
//! request bodies.

pub mod domain;
pub mod error;
pub mod protocol;
