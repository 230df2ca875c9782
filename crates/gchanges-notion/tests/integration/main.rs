//! Integration tests for gchanges-notion
//!
//! Uses wiremock to simulate the Notion API and verifies the blocking
//! client, the record service and tracked record loading end to end.

mod common;

mod test_records;
mod test_state;
